///
/// Login name lookup through getlogin_r(3).
///
/// The first buffer is sized from `_SC_LOGIN_NAME_MAX` and doubled on
/// ERANGE, so long names are never truncated.
///

use hostfuncs_core::HostFuncError;

// POSIX getlogin_r, not bound by libc on every target.
unsafe extern "C" {
    fn getlogin_r(name: *mut libc::c_char, namesize: libc::size_t) -> libc::c_int;
}

const FALLBACK_LOGIN_NAME_MAX: usize = 256;
const LOGIN_NAME_CEILING: usize = 64 * 1024;

fn initial_capacity() -> usize {
    let max = unsafe { libc::sysconf(libc::_SC_LOGIN_NAME_MAX) };
    usize::try_from(max)
        .ok()
        .filter(|&n| n > 0)
        .unwrap_or(FALLBACK_LOGIN_NAME_MAX)
}

/// `Ok(None)` when the OS cannot name the login, for example when the
/// process has no controlling terminal.
pub fn login_name() -> Result<Option<Vec<u8>>, HostFuncError> {
    let mut capacity = initial_capacity().saturating_add(1);
    loop {
        let mut buf = Vec::new();
        buf.try_reserve_exact(capacity)
            .map_err(|_| HostFuncError::OutOfMemory { function: "getlogin" })?;
        buf.resize(capacity, 0u8);

        let rc = unsafe { getlogin_r(buf.as_mut_ptr().cast::<libc::c_char>(), buf.len()) };
        if rc == 0 {
            let len = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
            buf.truncate(len);
            return Ok(Some(buf));
        }

        let errno = if rc > 0 {
            rc
        } else {
            std::io::Error::last_os_error().raw_os_error().unwrap_or(0)
        };
        if errno == libc::ERANGE && capacity < LOGIN_NAME_CEILING {
            capacity *= 2;
            continue;
        }
        tracing::trace!(errno, "getlogin_r failed");
        return Ok(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_capacity_is_positive() {
        assert!(initial_capacity() > 0);
    }

    #[test]
    fn test_login_name_has_no_padding() {
        if let Some(name) = login_name().unwrap() {
            assert!(!name.contains(&0));
            assert!(!name.is_empty());
        }
    }
}
