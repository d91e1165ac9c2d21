//! Ctrl-C handling
//!
//! An interrupt between prompts ends the program with a goodbye and a
//! successful exit status instead of the default signal death.

#[cfg(unix)]
const GOODBYE: &[u8] = "\n\n👋 Program terminated by user. Goodbye!\n\n".as_bytes();

#[cfg(unix)]
extern "C" fn goodbye_handler(_sig: libc::c_int) {
    // Only async-signal-safe calls in here
    unsafe {
        let _ = libc::write(
            libc::STDOUT_FILENO,
            GOODBYE.as_ptr() as *const libc::c_void,
            GOODBYE.len(),
        );
        libc::_exit(0);
    }
}

/// Installs the SIGINT handler for the rest of the process lifetime
#[cfg(unix)]
pub fn install_handler() {
    unsafe {
        let handler = goodbye_handler as extern "C" fn(libc::c_int) as libc::sighandler_t;
        if libc::signal(libc::SIGINT, handler) == libc::SIG_ERR {
            log::warn!("Failed to install SIGINT handler");
        }
    }
}

#[cfg(not(unix))]
pub fn install_handler() {}
