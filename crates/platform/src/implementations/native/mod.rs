//! Host platform implementation on top of `tokio::fs` and `tokio::process`

pub mod filesystem;
pub mod process;

/// Native platform implementation
pub struct NativePlatform;

impl NativePlatform {
    /// Create a new native platform instance
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> crate::core::Platform {
        use filesystem::NativeFilesystemOperations;
        use process::NativeProcessOperations;

        crate::core::Platform::new(
            Box::new(NativeFilesystemOperations::new()),
            Box::new(NativeProcessOperations::new()),
        )
    }
}
