use crate::error::{Error, Result};
use crate::format::{format_sizeof, with_message};
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};

/// Resident set size of the current process, in bytes
pub fn resident_memory() -> Result<u64> {
    let pid = sysinfo::get_current_pid().map_err(|e| Error::Process(e.to_string()))?;

    let mut system = System::new();
    system.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[pid]),
        true,
        ProcessRefreshKind::nothing().with_memory(),
    );

    let process = system
        .process(pid)
        .ok_or_else(|| Error::Process(format!("process {pid} not found")))?;
    Ok(process.memory())
}

/// Report the current resident memory.
///
/// With `echo` unset the raw byte count is returned. Otherwise the value is
/// printed (raw when `echo_bytes`, human readable when not), prefixed with
/// `"{msg}: "` if a message is given, and `None` is returned.
pub fn used_mem(msg: Option<&str>, echo: bool, echo_bytes: bool) -> Result<Option<u64>> {
    let mem_bytes = resident_memory()?;
    if !echo {
        return Ok(Some(mem_bytes));
    }

    let size = if echo_bytes {
        mem_bytes.to_string()
    } else {
        format_sizeof(mem_bytes as f64, "B", 1024.0)
    };
    println!("{}", with_message(msg, size));
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resident_memory_is_nonzero() {
        let bytes = resident_memory().unwrap();
        assert!(bytes > 0);
    }

    #[test]
    fn test_used_mem_returns_bytes_without_echo() {
        let bytes = used_mem(None, false, false).unwrap();
        assert!(matches!(bytes, Some(n) if n > 0));
    }

    #[test]
    fn test_used_mem_echo_returns_nothing() {
        assert_eq!(used_mem(Some("after setup"), true, false).unwrap(), None);
        assert_eq!(used_mem(None, true, true).unwrap(), None);
    }
}
