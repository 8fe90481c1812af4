use std::{
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use pretty_assertions::assert_eq;
use sparsebundle::{
    BlockStore, Bundle, BundleError, BundleOptions, MemoryStore, OpenStore, RawImageStore, Read,
    ReadAt, Seek, SeekFrom, StoreError, Write,
};

/// Counts how often the store was opened and closed, and can be told to fail.
#[derive(Debug, Default, Clone)]
struct Counters {
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
}

#[derive(Debug)]
struct CountingStore {
    inner: MemoryStore,
    counters: Counters,
    fail_reads: bool,
    fail_close: bool,
}

impl CountingStore {
    fn new(counters: &Counters) -> Self {
        counters.opened.fetch_add(1, Ordering::SeqCst);
        Self {
            inner: MemoryStore::new(1024),
            counters: counters.clone(),
            fail_reads: false,
            fail_close: false,
        }
    }
}

impl BlockStore for CountingStore {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> Result<usize, StoreError> {
        if self.fail_reads {
            return Err(StoreError::new("band 0 is corrupt"));
        }
        self.inner.read_at(buf, offset)
    }

    fn write_at(&self, buf: &[u8], offset: u64) -> Result<usize, StoreError> {
        self.inner.write_at(buf, offset)
    }

    fn size(&self) -> u64 {
        self.inner.size()
    }

    fn flush(&self) -> Result<(), StoreError> {
        self.inner.flush()
    }

    fn close(self) -> Result<(), StoreError> {
        self.counters.closed.fetch_add(1, Ordering::SeqCst);
        if self.fail_close {
            return Err(StoreError::new("band 2 could not be synced"));
        }
        self.inner.close()
    }
}

thread_local! {
    static OPEN_COUNTERS: Counters = Counters::default();
}

impl OpenStore for CountingStore {
    fn open(path: &Path, _options: &BundleOptions) -> Result<Self, StoreError> {
        if !path.ends_with("disk.sparsebundle") {
            return Err(StoreError::new("Info.plist not found"));
        }
        Ok(OPEN_COUNTERS.with(CountingStore::new))
    }
}

#[test]
fn open_rejects_options_before_store() {
    let options = BundleOptions::default().with_max_open_bands(9);
    let result = Bundle::<CountingStore>::open("disk.sparsebundle", options);
    assert!(matches!(result, Err(BundleError::MaxOpenBands(9))));
    OPEN_COUNTERS.with(|c| assert_eq!(c.opened.load(Ordering::SeqCst), 0));
}

#[test]
fn open_failure_wraps_diagnostic() {
    let err = Bundle::<CountingStore>::open("foo", BundleOptions::default()).unwrap_err();
    assert_eq!(err.to_string(), "failed to open \"foo\": Info.plist not found");
}

#[test]
fn open_and_close() {
    let mut bundle =
        Bundle::<CountingStore>::open("images/disk.sparsebundle", BundleOptions::default())
            .unwrap();
    assert_eq!(bundle.path(), Some(Path::new("images/disk.sparsebundle")));
    assert_eq!(bundle.size(), 1024);
    bundle.close().unwrap();
    assert!(matches!(bundle.close(), Err(BundleError::NotOpen)));
    drop(bundle);
    OPEN_COUNTERS.with(|c| {
        assert_eq!(c.opened.load(Ordering::SeqCst), 1);
        assert_eq!(c.closed.load(Ordering::SeqCst), 1);
    });
}

#[test]
fn close_is_final_even_on_error() {
    let counters = Counters::default();
    let mut store = CountingStore::new(&counters);
    store.fail_close = true;
    let mut bundle = Bundle::with_store(store, BundleOptions::default()).unwrap();

    let err = bundle.close().unwrap_err();
    assert_eq!(err.to_string(), "failed to close: band 2 could not be synced");
    assert!(matches!(bundle.close(), Err(BundleError::NotOpen)));
    assert!(bundle.size() < 0);
    drop(bundle);
    assert_eq!(counters.closed.load(Ordering::SeqCst), 1);
}

#[test]
fn drop_closes_store() {
    let counters = Counters::default();
    {
        let _bundle =
            Bundle::with_store(CountingStore::new(&counters), BundleOptions::default()).unwrap();
    }
    assert_eq!(counters.closed.load(Ordering::SeqCst), 1);
}

#[test]
fn failed_read_keeps_cursor() {
    let counters = Counters::default();
    let mut store = CountingStore::new(&counters);
    store.fail_reads = true;
    let mut bundle = Bundle::with_store(store, BundleOptions::default()).unwrap();
    bundle.seek(SeekFrom::Start(100)).unwrap();

    let mut buf = [0u8; 10];
    let err = bundle.read(&mut buf).unwrap_err();
    assert_eq!(err.to_string(), "failed to read: band 0 is corrupt");
    assert_eq!(bundle.position(), 100);
    // The bundle stays usable
    assert_eq!(bundle.write(&[1, 2, 3]).unwrap(), 3);
    assert_eq!(bundle.position(), 103);
}

#[test]
fn io_traits_round_trip() {
    let mut bundle = Bundle::with_store(MemoryStore::new(4096), BundleOptions::default()).unwrap();
    let data: Vec<u8> = (1u8..=10).collect();

    Seek::seek(&mut bundle, SeekFrom::Start(0)).unwrap();
    Write::write_all(&mut bundle, &data).unwrap();
    assert_eq!(bundle.position(), 10);
    Write::flush(&mut bundle).unwrap();

    Seek::seek(&mut bundle, SeekFrom::Start(0)).unwrap();
    let mut out = [0u8; 10];
    Read::read_exact(&mut bundle, &mut out).unwrap();
    assert_eq!(out.to_vec(), data);

    assert_eq!(Seek::seek(&mut bundle, SeekFrom::End(0)).unwrap(), 4096);
    let err = Seek::seek(&mut bundle, SeekFrom::Current(-5000)).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    assert_eq!(bundle.position(), 4096);
}

#[test]
fn read_to_end_stops_at_size() {
    let mut bundle = Bundle::with_store(
        MemoryStore::from_vec(vec![0x5A; 1000]),
        BundleOptions::default(),
    )
    .unwrap();
    bundle.seek(SeekFrom::Start(900)).unwrap();
    let mut rest = Vec::new();
    Read::read_to_end(&mut bundle, &mut rest).unwrap();
    assert_eq!(rest, vec![0x5A; 100]);
}

#[test]
fn positioned_reads_across_threads() {
    let bundle = Bundle::with_store(
        MemoryStore::from_vec((0..=255u8).cycle().take(1 << 16).collect()),
        BundleOptions::default(),
    )
    .unwrap();

    std::thread::scope(|scope| {
        for t in 0..4u64 {
            let bundle = &bundle;
            scope.spawn(move || {
                let mut buf = [0u8; 256];
                for block in 0..64u64 {
                    let offset = (t * 64 + block) * 256;
                    bundle.read_exact_at(&mut buf, offset).unwrap();
                    assert_eq!(buf[0], 0);
                    assert_eq!(buf[255], 255);
                }
            });
        }
    });
    assert_eq!(bundle.position(), 0);
}

#[test]
fn raw_image_round_trip() {
    let mut image = tempfile::NamedTempFile::new().unwrap();
    image.write_all(&vec![0u8; 128 * 1024]).unwrap();
    image.flush().unwrap();

    let mut bundle: Bundle<RawImageStore> =
        Bundle::open(image.path(), BundleOptions::default()).unwrap();
    assert_eq!(bundle.size(), 128 * 1024);

    bundle.seek(SeekFrom::Start(440)).unwrap();
    assert_eq!(bundle.write(&[0xFE, 0xFF, 0xFF]).unwrap(), 3);
    assert_eq!(bundle.position(), 443);
    bundle.flush().unwrap();

    bundle.seek(SeekFrom::Start(440)).unwrap();
    let mut buf = [0u8; 10];
    assert_eq!(bundle.read(&mut buf).unwrap(), 10);
    assert_eq!(bundle.position(), 450);
    assert_eq!(buf, [0xFE, 0xFF, 0xFF, 0, 0, 0, 0, 0, 0, 0]);
    bundle.close().unwrap();

    let reopened: Bundle<RawImageStore> = Bundle::open(
        image.path(),
        BundleOptions::default().with_read_only(true),
    )
    .unwrap();
    let mut buf = [0u8; 3];
    reopened.read_exact_at(&mut buf, 440).unwrap();
    assert_eq!(buf, [0xFE, 0xFF, 0xFF]);
    assert!(matches!(
        reopened.write_at(&buf, 0),
        Err(BundleError::Write(_))
    ));
}
