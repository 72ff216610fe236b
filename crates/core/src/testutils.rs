use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A directory with organizable files, an unruled file, a text file,
/// an extensionless file and a nested photo folder.
pub fn create_mixed_dir() -> TempDir {
    let dir = TempDir::new().unwrap();

    write_file(dir.path(), "a.pdf", "%PDF-1.4");
    write_file(dir.path(), "b.jpg", "jpeg bytes");
    write_file(dir.path(), "c.xyz", "unknown");
    write_file(dir.path(), "Notes.MD", "# notes\n");
    write_file(dir.path(), "readme", "plain");

    let photos = dir.path().join("photos");
    fs::create_dir_all(photos.join("2024")).unwrap();
    write_file(&photos, "sunset.PNG", "png");
    write_file(photos.join("2024"), "beach.png", "png");
    write_file(&photos, "list.txt", "sunset, beach");

    dir
}

pub fn write_file(dir: impl AsRef<Path>, name: &str, content: &str) {
    fs::write(dir.as_ref().join(name), content).unwrap();
}

pub fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}
