//! Compile-time selection of the trash backend for the target platform.

use crate::errors::Result;

#[cfg(target_os = "macos")]
#[path = "macos.rs"]
mod platform_impl;

#[cfg(target_os = "windows")]
#[path = "windows.rs"]
mod platform_impl;

#[cfg(all(unix, not(target_os = "macos")))]
pub mod freedesktop;

#[cfg(all(unix, not(target_os = "macos")))]
use freedesktop as platform_impl;

#[cfg(not(any(unix, windows)))]
compile_error!("send2trash supports macOS, Windows and freedesktop.org Unix targets only");

pub(crate) fn send(path: &str) -> Result<()> {
    platform_impl::send(path)
}
