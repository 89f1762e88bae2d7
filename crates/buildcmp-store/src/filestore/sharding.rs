//! Sharded layout of the file store
//!
//! For digest "abc123..." a file lives at `<namespace>/ab/abc123.<ext>`.

/// Store-relative path of a file, always with `/` separators
pub fn shard_relative_path(namespace: &str, digest: &str, extension: &str) -> String {
    let shard = &digest[..2.min(digest.len())];
    if extension.is_empty() {
        format!("{}/{}/{}", namespace, shard, digest)
    } else {
        format!("{}/{}/{}.{}", namespace, shard, digest, extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shard_relative_path() {
        assert_eq!(
            shard_relative_path("source", "abc123def456", "zip"),
            "source/ab/abc123def456.zip"
        );
    }

    #[test]
    fn test_shard_without_extension() {
        assert_eq!(shard_relative_path("target", "ff00", ""), "target/ff/ff00");
    }
}
