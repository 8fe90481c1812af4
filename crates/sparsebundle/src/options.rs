use crate::error::BundleError;

/// The lowest accepted value for [`BundleOptions::max_open_bands`].
pub const MIN_OPEN_BANDS: usize = 10;

/// The options used when opening a [`Bundle`](crate::Bundle)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleOptions {
    /// How many band files the store may keep open at the same time.
    ///
    /// Stores that are not split into bands ignore this, but it is validated regardless, so a
    /// configuration that works with one store works with all of them.
    pub max_open_bands: usize,
    /// Opens the image without write access. Writes fail with the store's diagnostic.
    pub read_only: bool,
}

impl Default for BundleOptions {
    fn default() -> Self {
        Self {
            max_open_bands: 16,
            read_only: false,
        }
    }
}

impl BundleOptions {
    /// Sets the number of band files that may be open at once, see [`Self::max_open_bands`]
    pub fn with_max_open_bands(mut self, max_open_bands: usize) -> Self {
        self.max_open_bands = max_open_bands;
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Checks the options, before any store is touched.
    pub fn validate(&self) -> Result<(), BundleError> {
        if self.max_open_bands < MIN_OPEN_BANDS {
            return Err(BundleError::MaxOpenBands(self.max_open_bands));
        }
        Ok(())
    }
}
