//! Platform-independent path helpers.

/// URL scheme used for locators of files on the local filesystem.
pub const LOCAL_FILE_PROTOCOL: &str = "file";

/// Converts a path to its system-independent form (forward slashes only).
pub fn to_system_independent_name(path: &str) -> String {
    path.replace('\\', "/")
}

/// Builds the canonical locator for a local source path, e.g.
/// `C:\src\Main.java` becomes `file://C:/src/Main.java`.
pub fn local_file_url(path: &str) -> String {
    format!(
        "{}://{}",
        LOCAL_FILE_PROTOCOL,
        to_system_independent_name(path)
    )
}
