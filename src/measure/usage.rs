//! Platform Resource-Usage Collection
//!
//! Turns raw OS accounting for a finished child process into a
//! [`Measurement`]. Collection is all-or-nothing: if any counter cannot
//! be retrieved, the whole measurement fails and no partial report is
//! produced.
//!
//! Windows reports process times as 100-nanosecond ticks
//! (`GetProcessTimes`) and memory through `PROCESS_MEMORY_COUNTERS`.
//! Unix reports CPU times and memory through `getrusage`; wall-clock
//! elapsed time comes from a monotonic clock bracketing the spawn and
//! wait calls, since process creation/exit timestamps are not exposed.

use std::io;
use std::process::{Child, ExitStatus};
use std::time::Duration;

use crate::error::TimerError;
use crate::measure::Measurement;

/// Length of one process-time tick in seconds.
///
/// The reference unit is the Windows `FILETIME` tick of 100 nanoseconds;
/// all tick-to-seconds conversions go through this constant.
pub const SECONDS_PER_TICK: f64 = 1.0e-7;

/// Converts a 100-nanosecond tick count to seconds.
pub fn ticks_to_seconds(ticks: u64) -> f64 {
    ticks as f64 * SECONDS_PER_TICK
}

/// Collects exit code, CPU times and memory counters for an exited child.
#[cfg(windows)]
pub fn collect(
    child: &Child,
    status: ExitStatus,
    _wall: Duration,
) -> Result<Measurement, TimerError> {
    use std::os::windows::io::AsRawHandle;

    use windows_sys::Win32::Foundation::{FILETIME, HANDLE};
    use windows_sys::Win32::System::ProcessStatus::{
        K32GetProcessMemoryInfo, PROCESS_MEMORY_COUNTERS,
    };
    use windows_sys::Win32::System::Threading::GetProcessTimes;

    fn filetime_ticks(t: &FILETIME) -> u64 {
        ((t.dwHighDateTime as u64) << 32) | t.dwLowDateTime as u64
    }

    let exit_code = status
        .code()
        .ok_or_else(|| TimerError::Collection(missing_exit_code()))?;

    let handle = child.as_raw_handle() as HANDLE;

    let mut creation: FILETIME = unsafe { std::mem::zeroed() };
    let mut exit: FILETIME = unsafe { std::mem::zeroed() };
    let mut kernel: FILETIME = unsafe { std::mem::zeroed() };
    let mut user: FILETIME = unsafe { std::mem::zeroed() };

    // SAFETY: the handle is open (the Child is still alive) and the four
    // out-pointers reference live stack storage.
    let ok = unsafe { GetProcessTimes(handle, &mut creation, &mut exit, &mut kernel, &mut user) };
    if ok == 0 {
        return Err(TimerError::Collection(io::Error::last_os_error()));
    }

    let elapsed_ticks = filetime_ticks(&exit).saturating_sub(filetime_ticks(&creation));

    let mut pmc: PROCESS_MEMORY_COUNTERS = unsafe { std::mem::zeroed() };
    pmc.cb = std::mem::size_of::<PROCESS_MEMORY_COUNTERS>() as u32;

    // SAFETY: pmc.cb matches the struct the pointer references.
    let ok = unsafe { K32GetProcessMemoryInfo(handle, &mut pmc, pmc.cb) };
    if ok == 0 {
        return Err(TimerError::Collection(io::Error::last_os_error()));
    }

    Ok(Measurement {
        exit_code,
        elapsed_seconds: ticks_to_seconds(elapsed_ticks),
        kernel_seconds: ticks_to_seconds(filetime_ticks(&kernel)),
        user_seconds: ticks_to_seconds(filetime_ticks(&user)),
        peak_working_set_kb: pmc.PeakWorkingSetSize as u64 / 1024,
        paged_pool_kb: pmc.QuotaPeakPagedPoolUsage as u64 / 1024,
        nonpaged_pool_kb: pmc.QuotaPeakNonPagedPoolUsage as u64 / 1024,
        peak_pagefile_kb: pmc.PeakPagefileUsage as u64 / 1024,
        page_fault_count: pmc.PageFaultCount as u64,
    })
}

/// Collects exit code, CPU times and memory counters for an exited child.
///
/// Exactly one child is spawned per run, so `getrusage(RUSAGE_CHILDREN)`
/// (the aggregate over all waited-for children) equals that child's usage.
/// Paged/non-paged pool and page-file peaks have no Unix equivalent and
/// are reported as zero.
#[cfg(unix)]
pub fn collect(
    _child: &Child,
    status: ExitStatus,
    wall: Duration,
) -> Result<Measurement, TimerError> {
    let exit_code = status
        .code()
        .ok_or_else(|| TimerError::Collection(missing_exit_code()))?;

    let mut usage: libc::rusage = unsafe { std::mem::zeroed() };

    // SAFETY: the pointer references live, zero-initialized stack storage.
    let ret = unsafe { libc::getrusage(libc::RUSAGE_CHILDREN, &mut usage) };
    if ret != 0 {
        return Err(TimerError::Collection(io::Error::last_os_error()));
    }

    Ok(Measurement {
        exit_code,
        elapsed_seconds: wall.as_secs_f64(),
        kernel_seconds: timeval_seconds(&usage.ru_stime),
        user_seconds: timeval_seconds(&usage.ru_utime),
        peak_working_set_kb: maxrss_kb(usage.ru_maxrss),
        paged_pool_kb: 0,
        nonpaged_pool_kb: 0,
        peak_pagefile_kb: 0,
        page_fault_count: saturating_u64(usage.ru_minflt) + saturating_u64(usage.ru_majflt),
    })
}

/// Error value for a child that left no exit code (e.g. killed by signal).
fn missing_exit_code() -> io::Error {
    io::Error::new(
        io::ErrorKind::Other,
        "child terminated without an exit code",
    )
}

#[cfg(unix)]
fn timeval_seconds(tv: &libc::timeval) -> f64 {
    tv.tv_sec as f64 + tv.tv_usec as f64 * 1.0e-6
}

#[cfg(unix)]
fn saturating_u64(v: libc::c_long) -> u64 {
    v.max(0) as u64
}

/// `ru_maxrss` is reported in bytes on macOS.
#[cfg(target_os = "macos")]
fn maxrss_kb(maxrss: libc::c_long) -> u64 {
    saturating_u64(maxrss) / 1024
}

/// `ru_maxrss` is reported in kilobytes on Linux and the BSDs.
#[cfg(all(unix, not(target_os = "macos")))]
fn maxrss_kb(maxrss: libc::c_long) -> u64 {
    saturating_u64(maxrss)
}
