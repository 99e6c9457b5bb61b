//! Named semaphore operations
//!
//! Each operation resolves the name to the underlying OS object for the
//! duration of the call only: open, act once, close. The OS counter is the
//! coordination primitive; this module adds no locking of its own.

use std::io;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::name::sem_path;

/// Permission bits for newly created semaphores (rw for user, read for
/// group and others, filtered by the process umask).
const CREATE_MODE: libc::mode_t = 0o644;

/// Upper bound accepted for the initial counter value.
///
/// POSIX only promises `SEM_VALUE_MAX >= 32767`; Linux pins it at
/// `INT_MAX`. Values within this bound that still exceed a smaller
/// platform limit are rejected by the OS and surfaced as
/// [`Error::InvalidArgument`].
const MAX_COUNT: u32 = libc::c_int::MAX as u32;

/// Process-local handle to a named OS semaphore, scoped to one operation.
///
/// Closed in `Drop`, so every exit path of every operation releases it.
struct Sem {
    raw: *mut libc::sem_t,
}

impl Sem {
    /// Open an existing named semaphore.
    fn open(name: &str) -> Result<Self> {
        let path = sem_path(name)?;
        let raw = unsafe { libc::sem_open(path.as_ptr(), 0) };
        if raw == libc::SEM_FAILED {
            let err = io::Error::last_os_error();
            return Err(match err.raw_os_error() {
                Some(libc::ENOENT) => Error::NotFound {
                    name: name.to_string(),
                },
                Some(libc::EACCES) => Error::PermissionDenied {
                    name: name.to_string(),
                },
                _ => Error::Os {
                    op: "sem_open",
                    source: err,
                },
            });
        }
        Ok(Self { raw })
    }

    /// Decrement the counter if it is positive, without blocking.
    fn try_acquire(&self) -> Result<bool> {
        loop {
            if unsafe { libc::sem_trywait(self.raw) } == 0 {
                return Ok(true);
            }
            let err = io::Error::last_os_error();
            match err.raw_os_error() {
                Some(libc::EAGAIN) => return Ok(false),
                Some(libc::EINTR) => {}
                _ => {
                    return Err(Error::Os {
                        op: "sem_trywait",
                        source: err,
                    })
                }
            }
        }
    }
}

impl Drop for Sem {
    fn drop(&mut self) {
        // Close failure has nowhere to report; the handle is dead either way.
        unsafe { libc::sem_close(self.raw) };
    }
}

/// Create a named semaphore with counter `initial`.
///
/// The new namespace entry is visible to every process on the host and
/// outlives this one; it persists until [`remove`] unlinks it.
///
/// # Errors
///
/// - [`Error::AlreadyExists`] when a live object with that name exists
/// - [`Error::InvalidName`] / [`Error::InvalidArgument`] for rejected input
/// - [`Error::PermissionDenied`] per OS access control
pub fn create(name: &str, initial: u32) -> Result<()> {
    if initial > MAX_COUNT {
        return Err(Error::InvalidArgument {
            what: format!("initial value {initial} exceeds the platform maximum"),
        });
    }
    let path = sem_path(name)?;
    let raw = unsafe {
        libc::sem_open(
            path.as_ptr(),
            libc::O_CREAT | libc::O_EXCL,
            libc::c_uint::from(CREATE_MODE),
            libc::c_uint::from(initial),
        )
    };
    if raw == libc::SEM_FAILED {
        let err = io::Error::last_os_error();
        return Err(match err.raw_os_error() {
            Some(libc::EEXIST) => Error::AlreadyExists {
                name: name.to_string(),
            },
            Some(libc::EACCES) => Error::PermissionDenied {
                name: name.to_string(),
            },
            Some(libc::EINVAL) => Error::InvalidArgument {
                what: format!("initial value {initial} exceeds the platform maximum"),
            },
            Some(libc::ENAMETOOLONG) => Error::InvalidName {
                name: name.to_string(),
                reason: "name is too long".to_string(),
            },
            _ => Error::Os {
                op: "sem_open",
                source: err,
            },
        });
    }
    // Creation done; release the handle straight away.
    drop(Sem { raw });
    Ok(())
}

/// Increment the counter by one, releasing at most one blocked waiter.
///
/// Which waiter wakes is up to the OS; no FIFO order is promised.
///
/// # Errors
///
/// - [`Error::NotFound`] when the name denotes no live object
/// - [`Error::Overflow`] when the counter is at its platform maximum
pub fn post(name: &str) -> Result<()> {
    let sem = Sem::open(name)?;
    if unsafe { libc::sem_post(sem.raw) } != 0 {
        let err = io::Error::last_os_error();
        return Err(match err.raw_os_error() {
            Some(libc::EOVERFLOW) => Error::Overflow {
                name: name.to_string(),
            },
            _ => Error::Os {
                op: "sem_post",
                source: err,
            },
        });
    }
    Ok(())
}

/// Block the calling thread until the counter is positive, then decrement.
///
/// Restarted transparently when a signal interrupts the wait. If another
/// process removes the semaphore mid-wait, this process's open handle
/// keeps the object alive until the call finishes.
///
/// # Errors
///
/// [`Error::NotFound`] when the name denotes no live object at call time.
pub fn wait(name: &str) -> Result<()> {
    let sem = Sem::open(name)?;
    loop {
        if unsafe { libc::sem_wait(sem.raw) } == 0 {
            return Ok(());
        }
        let err = io::Error::last_os_error();
        if err.raw_os_error() != Some(libc::EINTR) {
            return Err(Error::Os {
                op: "sem_wait",
                source: err,
            });
        }
    }
}

/// Decrement the counter if it is positive; never blocks.
///
/// Returns `Ok(true)` if decremented, `Ok(false)` if the counter was zero.
///
/// # Errors
///
/// [`Error::NotFound`] when the name denotes no live object.
pub fn try_wait(name: &str) -> Result<bool> {
    let sem = Sem::open(name)?;
    sem.try_acquire()
}

/// Block until the counter is positive or `timeout` elapses.
///
/// Returns `Ok(true)` if decremented before the deadline, `Ok(false)` on
/// timeout; timing out is not an error. The deadline is computed once at
/// call entry as wall-clock now plus `timeout` (`CLOCK_REALTIME`), so
/// wall-clock adjustments during the wait lengthen or shorten it. A zero
/// `timeout` degenerates to a non-blocking attempt.
///
/// On macOS, which has no `sem_timedwait`, the wait is emulated by polling
/// `sem_trywait` against the same wall-clock deadline.
///
/// # Errors
///
/// [`Error::NotFound`] when the name denotes no live object at call time.
pub fn timed_wait(name: &str, timeout: Duration) -> Result<bool> {
    let sem = Sem::open(name)?;
    let deadline = deadline_after(timeout)?;
    timed_wait_on(&sem, &deadline)
}

/// Remove the named semaphore from the OS namespace.
///
/// Returns `Ok(true)` if the name existed and was unlinked, `Ok(false)` if
/// it did not exist - an absent name is a normal outcome here, never
/// [`Error::NotFound`]. Unlinking removes the *name* immediately; the
/// object itself is destroyed once the last open handle closes, so
/// processes already blocked in a wait are unaffected.
///
/// # Errors
///
/// [`Error::PermissionDenied`] per OS access control.
pub fn remove(name: &str) -> Result<bool> {
    let path = sem_path(name)?;
    if unsafe { libc::sem_unlink(path.as_ptr()) } == 0 {
        return Ok(true);
    }
    let err = io::Error::last_os_error();
    match err.raw_os_error() {
        Some(libc::ENOENT) => Ok(false),
        Some(libc::EACCES) => Err(Error::PermissionDenied {
            name: name.to_string(),
        }),
        _ => Err(Error::Os {
            op: "sem_unlink",
            source: err,
        }),
    }
}

/// Wall-clock now, as a `timespec`.
fn realtime_now() -> Result<libc::timespec> {
    let mut now = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    if unsafe { libc::clock_gettime(libc::CLOCK_REALTIME, &mut now) } != 0 {
        return Err(Error::Os {
            op: "clock_gettime",
            source: io::Error::last_os_error(),
        });
    }
    Ok(now)
}

/// Absolute wall-clock deadline `timeout` from now.
fn deadline_after(timeout: Duration) -> Result<libc::timespec> {
    const NANOS_PER_SEC: libc::c_long = 1_000_000_000;

    let now = realtime_now()?;
    let overflow = || Error::InvalidArgument {
        what: format!("timeout of {}s overflows the clock", timeout.as_secs()),
    };

    let mut tv_sec = libc::time_t::try_from(timeout.as_secs())
        .ok()
        .and_then(|secs| now.tv_sec.checked_add(secs))
        .ok_or_else(overflow)?;
    let mut tv_nsec = now.tv_nsec + timeout.subsec_nanos() as libc::c_long;
    if tv_nsec >= NANOS_PER_SEC {
        tv_sec = tv_sec.checked_add(1).ok_or_else(overflow)?;
        tv_nsec -= NANOS_PER_SEC;
    }
    Ok(libc::timespec { tv_sec, tv_nsec })
}

#[cfg(not(target_os = "macos"))]
fn timed_wait_on(sem: &Sem, deadline: &libc::timespec) -> Result<bool> {
    loop {
        if unsafe { libc::sem_timedwait(sem.raw, deadline) } == 0 {
            return Ok(true);
        }
        let err = io::Error::last_os_error();
        match err.raw_os_error() {
            Some(libc::ETIMEDOUT) => return Ok(false),
            Some(libc::EINTR) => {}
            _ => {
                return Err(Error::Os {
                    op: "sem_timedwait",
                    source: err,
                })
            }
        }
    }
}

#[cfg(target_os = "macos")]
fn timed_wait_on(sem: &Sem, deadline: &libc::timespec) -> Result<bool> {
    const POLL_INTERVAL: Duration = Duration::from_millis(1);
    loop {
        if sem.try_acquire()? {
            return Ok(true);
        }
        let now = realtime_now()?;
        let expired = now.tv_sec > deadline.tv_sec
            || (now.tv_sec == deadline.tv_sec && now.tv_nsec >= deadline.tv_nsec);
        if expired {
            return Ok(false);
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}
