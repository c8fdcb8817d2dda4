//! Embedding blob format and cache backends
//!
//! Corpus embeddings are expensive to compute and trivial to re-derive, so
//! they persist as a single binary blob per corpus fingerprint:
//!
//! ```text
//! magic "LSEB" | version u32 | dimension u32 | row_count u64 |
//! fingerprint u64 | row-major f32 payload | crc32 u32
//! ```
//!
//! All integers and floats are little-endian. The trailing CRC covers every
//! preceding byte, and decoding rejects any blob whose fingerprint does not
//! match the corpus being asked about. A rejected blob is a cache miss, never
//! served data.

use crate::error::{CacheError, CacheResult, Result};
use crate::provider::EmbeddingVector;
use crate::similarity::check_dimension;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use lodestone_core::Corpus;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::hash::{Hash, Hasher};
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};
use xxhash_rust::xxh3::Xxh3;

/// Magic bytes at the start of every embedding blob
pub const BLOB_MAGIC: [u8; 4] = *b"LSEB";

/// Current blob format version
pub const BLOB_FORMAT_VERSION: u32 = 1;

/// Fixed header length: magic, version, dimension, row count, fingerprint
const BLOB_HEADER_LEN: usize = 4 + 4 + 4 + 8 + 8;

/// Identity of one corpus version, used as the cache key.
///
/// Hashes every key and document plus the document count, so any reorder,
/// edit, insertion, or removal changes the fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CorpusFingerprint {
    hash: u64,
    doc_count: usize,
}

impl CorpusFingerprint {
    /// Fingerprint a corpus
    pub fn of_corpus<K>(corpus: &Corpus<K>) -> Self
    where
        K: Clone + Eq + Hash + fmt::Debug,
    {
        let mut hasher = Xxh3::new();
        corpus.len().hash(&mut hasher);
        for (key, text) in corpus.iter() {
            key.hash(&mut hasher);
            text.hash(&mut hasher);
        }
        CorpusFingerprint {
            hash: hasher.finish(),
            doc_count: corpus.len(),
        }
    }

    /// The 64-bit content hash
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Number of documents in the fingerprinted corpus
    pub fn doc_count(&self) -> usize {
        self.doc_count
    }
}

impl fmt::Display for CorpusFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}-{}", self.hash, self.doc_count)
    }
}

/// A dense row-major matrix of corpus embeddings, one row per document.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingBlob {
    dimension: usize,
    data: Vec<f32>,
}

impl EmbeddingBlob {
    /// Build a blob from per-document vectors, checking every row against
    /// `dimension`. An empty row set yields a valid zero-row blob.
    pub fn from_rows(dimension: usize, rows: Vec<EmbeddingVector>) -> Result<Self> {
        for row in &rows {
            check_dimension(dimension, row.len())?;
        }
        let mut data = Vec::with_capacity(dimension * rows.len());
        for row in rows {
            data.extend(row);
        }
        Ok(EmbeddingBlob { dimension, data })
    }

    /// Vector dimension
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of document rows
    pub fn row_count(&self) -> usize {
        if self.dimension == 0 {
            0
        } else {
            self.data.len() / self.dimension
        }
    }

    /// Row for document `index`, if present
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        if self.dimension == 0 {
            return None;
        }
        let start = index.checked_mul(self.dimension)?;
        let end = start.checked_add(self.dimension)?;
        self.data.get(start..end)
    }

    /// Rows in document order
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks_exact(self.dimension.max(1))
    }

    /// Serialize with header, payload, and trailing CRC32
    pub fn to_bytes(&self, fingerprint: &CorpusFingerprint) -> CacheResult<Vec<u8>> {
        let mut bytes = Vec::with_capacity(BLOB_HEADER_LEN + self.data.len() * 4 + 4);
        bytes.extend_from_slice(&BLOB_MAGIC);
        bytes.write_u32::<LittleEndian>(BLOB_FORMAT_VERSION)?;
        bytes.write_u32::<LittleEndian>(self.dimension as u32)?;
        bytes.write_u64::<LittleEndian>(self.row_count() as u64)?;
        bytes.write_u64::<LittleEndian>(fingerprint.hash())?;
        for &value in &self.data {
            bytes.write_f32::<LittleEndian>(value)?;
        }
        let checksum = crc32fast::hash(&bytes);
        bytes.write_u32::<LittleEndian>(checksum)?;
        Ok(bytes)
    }

    /// Decode a blob, verifying structure, checksum, and that it belongs to
    /// the corpus identified by `expected`
    pub fn from_bytes(bytes: &[u8], expected: &CorpusFingerprint) -> CacheResult<Self> {
        if bytes.len() < BLOB_HEADER_LEN + 4 {
            return Err(CacheError::TooShort { found: bytes.len() });
        }
        if bytes[..4] != BLOB_MAGIC {
            return Err(CacheError::InvalidMagic);
        }

        let body = &bytes[..bytes.len() - 4];
        let stored_crc = Cursor::new(&bytes[bytes.len() - 4..]).read_u32::<LittleEndian>()?;
        let computed_crc = crc32fast::hash(body);
        if stored_crc != computed_crc {
            return Err(CacheError::ChecksumMismatch {
                expected: stored_crc,
                computed: computed_crc,
            });
        }

        let mut cursor = Cursor::new(&body[4..]);
        let version = cursor.read_u32::<LittleEndian>()?;
        if version != BLOB_FORMAT_VERSION {
            return Err(CacheError::UnsupportedVersion { found: version });
        }
        let dimension = cursor.read_u32::<LittleEndian>()? as usize;
        let row_count = cursor.read_u64::<LittleEndian>()? as usize;
        let fingerprint_hash = cursor.read_u64::<LittleEndian>()?;
        if fingerprint_hash != expected.hash() {
            return Err(CacheError::FingerprintMismatch {
                expected: expected.hash(),
                found: fingerprint_hash,
            });
        }

        let payload = &body[BLOB_HEADER_LEN..];
        let found_values = payload.len() / 4;
        let promised = (dimension as u128) * (row_count as u128);
        if payload.len() % 4 != 0 || promised != found_values as u128 {
            return Err(CacheError::Truncated {
                expected: promised.min(usize::MAX as u128) as usize,
                found: found_values,
            });
        }

        let mut data = vec![0.0f32; found_values];
        Cursor::new(payload).read_f32_into::<LittleEndian>(&mut data)?;
        Ok(EmbeddingBlob { dimension, data })
    }
}

/// Where corpus embedding blobs live between runs.
///
/// `load` returns `Ok(None)` for a clean miss; decode failures are errors so
/// the caller can log what was wrong before recomputing.
pub trait EmbeddingCache: Send + Sync {
    /// Load the blob for `fingerprint`, `None` on miss
    fn load(&self, fingerprint: &CorpusFingerprint) -> CacheResult<Option<EmbeddingBlob>>;

    /// Persist the blob for `fingerprint`
    fn save(&self, fingerprint: &CorpusFingerprint, blob: &EmbeddingBlob) -> CacheResult<()>;

    /// Short cache name for logs
    fn name(&self) -> &str;
}

/// Process-local cache, mainly for tests and repeated in-process builds
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<FxHashMap<CorpusFingerprint, EmbeddingBlob>>,
}

impl MemoryCache {
    /// Empty in-memory cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached blobs
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True when nothing is cached
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl EmbeddingCache for MemoryCache {
    fn load(&self, fingerprint: &CorpusFingerprint) -> CacheResult<Option<EmbeddingBlob>> {
        Ok(self.entries.read().get(fingerprint).cloned())
    }

    fn save(&self, fingerprint: &CorpusFingerprint, blob: &EmbeddingBlob) -> CacheResult<()> {
        self.entries.write().insert(*fingerprint, blob.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// On-disk cache: one blob file per fingerprint under a root directory.
///
/// Writes go through a hidden temp file, fsync, and rename, so a crash
/// mid-save leaves either the old blob or none, never a torn one.
#[derive(Debug, Clone)]
pub struct DirectoryCache {
    root: PathBuf,
}

impl DirectoryCache {
    /// Cache rooted at `root`; the directory is created on first save
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The cache root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn blob_path(&self, fingerprint: &CorpusFingerprint) -> PathBuf {
        self.root.join(format!("{}.emb", fingerprint))
    }

    fn temp_path(&self, fingerprint: &CorpusFingerprint) -> PathBuf {
        self.root.join(format!(".{}.emb.tmp", fingerprint))
    }
}

impl EmbeddingCache for DirectoryCache {
    fn load(&self, fingerprint: &CorpusFingerprint) -> CacheResult<Option<EmbeddingBlob>> {
        let path = self.blob_path(fingerprint);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CacheError::Io(e)),
        };
        EmbeddingBlob::from_bytes(&bytes, fingerprint).map(Some)
    }

    fn save(&self, fingerprint: &CorpusFingerprint, blob: &EmbeddingBlob) -> CacheResult<()> {
        fs::create_dir_all(&self.root)?;
        let bytes = blob.to_bytes(fingerprint)?;
        let final_path = self.blob_path(fingerprint);
        let temp_path = self.temp_path(fingerprint);

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&temp_path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, &final_path)?;

        // make the rename itself durable
        if let Some(parent) = final_path.parent() {
            if parent.exists() {
                File::open(parent)?.sync_all()?;
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "directory"
    }
}
