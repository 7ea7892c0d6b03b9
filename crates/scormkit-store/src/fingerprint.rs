use std::io::{self, Read, Seek};

use sha2::{Digest, Sha256};

const CHUNK_SIZE: usize = 8 * 1024;

/// Compute the hex-encoded SHA-256 digest of a stream's full content.
///
/// The stream is consumed in fixed-size chunks so memory use stays bounded
/// regardless of archive size, and it is rewound afterward so callers can
/// re-read it. Identical bytes always produce the same digest; the digest is
/// the sole key distinguishing "already extracted" from "needs extraction".
pub fn fingerprint<R: Read + Seek>(reader: &mut R) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; CHUNK_SIZE];

    loop {
        let read = reader.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    reader.rewind()?;

    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read, SeekFrom};

    use super::*;

    #[test]
    fn same_bytes_same_digest() {
        let mut first = Cursor::new(b"package content".to_vec());
        let mut second = Cursor::new(b"package content".to_vec());
        assert_eq!(
            fingerprint(&mut first).unwrap(),
            fingerprint(&mut second).unwrap()
        );
    }

    #[test]
    fn different_bytes_different_digest() {
        let mut first = Cursor::new(b"package a".to_vec());
        let mut second = Cursor::new(b"package b".to_vec());
        assert_ne!(
            fingerprint(&mut first).unwrap(),
            fingerprint(&mut second).unwrap()
        );
    }

    #[test]
    fn stream_position_restored() {
        let mut cursor = Cursor::new(b"rewind me".to_vec());
        fingerprint(&mut cursor).unwrap();
        let mut replay = Vec::new();
        cursor.read_to_end(&mut replay).unwrap();
        assert_eq!(replay, b"rewind me");
    }

    #[test]
    fn large_input_spans_chunks() {
        let data = vec![0xA5u8; CHUNK_SIZE * 3 + 17];
        let mut cursor = Cursor::new(data.clone());
        let whole = {
            let mut hasher = Sha256::new();
            hasher.update(&data);
            hex::encode(hasher.finalize())
        };
        assert_eq!(fingerprint(&mut cursor).unwrap(), whole);
        assert_eq!(cursor.seek(SeekFrom::Current(0)).unwrap(), 0);
    }

    #[test]
    fn empty_stream_has_stable_digest() {
        let mut cursor = Cursor::new(Vec::new());
        let digest = fingerprint(&mut cursor).unwrap();
        // SHA-256 of the empty string.
        assert_eq!(
            digest,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
