use crate::launcher_platform::LauncherPlatform;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// Subdirectory of the cache dir exposed through the FileProvider.
pub const APK_CACHE_SUBDIR: &str = "apks";

pub const SHARE_CHOOSER_TITLE: &str = "Share APK";

pub fn cached_apk_path(cache_dir: &Path, package_id: &str) -> PathBuf {
    cache_dir
        .join(APK_CACHE_SUBDIR)
        .join(format!("{}.apk", package_id))
}

/// Byte-for-byte copy of `source` into `dest`. The source is opened first so
/// an unreadable source leaves no file behind.
pub fn copy_apk(source: &Path, dest: &Path) -> Result<u64> {
    let mut input =
        File::open(source).with_context(|| format!("Failed to open source APK {:?}", source))?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create APK cache dir {:?}", parent))?;
    }

    let mut output =
        File::create(dest).with_context(|| format!("Failed to create {:?}", dest))?;
    let copied = io::copy(&mut input, &mut output)
        .with_context(|| format!("Failed to copy {:?} to {:?}", source, dest))?;
    Ok(copied)
}

/// Copies the installed APK of `package_id` into the private cache and opens
/// the share sheet on it. Returns the cached copy.
pub fn share_apk(
    platform: &dyn LauncherPlatform,
    cache_dir: &Path,
    package_id: &str,
    chooser_title: &str,
) -> Result<PathBuf> {
    let source = platform
        .application_source_path(package_id)
        .with_context(|| format!("Failed to look up installed APK of {}", package_id))?;
    let dest = cached_apk_path(cache_dir, package_id);

    let copied = copy_apk(&source, &dest)?;
    tracing::info!("Copied {} bytes from {:?} to {:?}", copied, source, dest);

    platform
        .share_file(&dest, chooser_title)
        .with_context(|| format!("Failed to share {:?}", dest))?;
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake_platform::FakePlatform;

    #[test]
    fn test_cached_apk_path_layout() {
        let path = cached_apk_path(Path::new("/cache"), "org.example.mail");
        assert_eq!(path, PathBuf::from("/cache/apks/org.example.mail.apk"));
    }

    #[test]
    fn test_share_copies_bytes_and_shares() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("base.apk");
        let contents: Vec<u8> = (0..=255u8).cycle().take(70_000).collect();
        fs::write(&source, &contents).unwrap();

        let mut platform = FakePlatform::default();
        platform.sources.insert("org.example.mail".to_string(), source);
        let cache_dir = dir.path().join("cache");

        let dest = share_apk(&platform, &cache_dir, "org.example.mail", "Share APK").unwrap();

        assert_eq!(dest, cache_dir.join("apks").join("org.example.mail.apk"));
        assert_eq!(fs::read(&dest).unwrap(), contents);
        assert_eq!(*platform.shared.borrow(), vec![dest]);
    }

    #[test]
    fn test_unreadable_source_produces_no_cache_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut platform = FakePlatform::default();
        platform
            .sources
            .insert("org.example.mail".to_string(), dir.path().join("missing.apk"));
        let cache_dir = dir.path().join("cache");

        let result = share_apk(&platform, &cache_dir, "org.example.mail", "Share APK");

        assert!(result.is_err());
        assert!(!cached_apk_path(&cache_dir, "org.example.mail").exists());
        assert!(platform.shared.borrow().is_empty());
    }

    #[test]
    fn test_unknown_package_fails_before_copy() {
        let dir = tempfile::tempdir().unwrap();
        let platform = FakePlatform::default();

        let result = share_apk(&platform, dir.path(), "org.example.gone", "Share APK");

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("org.example.gone"));
        assert!(!dir.path().join(APK_CACHE_SUBDIR).exists());
    }

    #[test]
    fn test_existing_copy_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("base.apk");
        fs::write(&source, b"new contents").unwrap();
        let dest = cached_apk_path(dir.path(), "org.example.mail");
        fs::create_dir_all(dest.parent().unwrap()).unwrap();
        fs::write(&dest, b"a much longer stale copy of the package").unwrap();

        copy_apk(&source, &dest).unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"new contents");
    }
}
