//! Shell-appropriate command text for environment variables.
//!
//! Produces the text a user's shell inside a session would run: `export`/
//! `unset` on Unix shells, `$env:`/`Remove-Item Env:` in PowerShell. The
//! multiplexer core never uses these - session creation passes bindings
//! straight to the external program - but commands injected into a running
//! pane do.

/// Command to set an environment variable in the session's shell.
#[cfg(not(windows))]
pub fn set_env_cmd(key: &str, value: &str) -> String {
    format!("export {}={}", key, shell_quote(value))
}

/// Command to set an environment variable in the session's shell.
///
/// Uses the `$env:VAR = "value"` syntax native to PowerShell.
#[cfg(windows)]
pub fn set_env_cmd(key: &str, value: &str) -> String {
    format!("$env:{key} = \"{value}\"")
}

/// Command to unset an environment variable in the session's shell.
#[cfg(not(windows))]
pub fn unset_env_cmd(key: &str) -> String {
    format!("unset {key}")
}

/// Command to unset an environment variable in the session's shell.
#[cfg(windows)]
pub fn unset_env_cmd(key: &str) -> String {
    format!("Remove-Item Env:\\{key} -ErrorAction SilentlyContinue")
}

/// Inline prefix that sets a variable before another command on one line,
/// e.g. `export KEY='val' && cmd`.
#[cfg(not(windows))]
pub fn inline_prefix(key: &str, value: &str) -> String {
    format!("export {}={} && ", key, shell_quote(value))
}

/// Inline prefix that sets a variable before another command on one line,
/// e.g. `$env:KEY = "val"; cmd`.
#[cfg(windows)]
pub fn inline_prefix(key: &str, value: &str) -> String {
    format!("$env:{key} = \"{value}\"; ")
}

/// Single-quote a value for POSIX shells. Embedded single quotes become
/// the `'\''` dance.
#[cfg(not(windows))]
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(windows))]
    mod unix {
        use super::*;

        #[test]
        fn test_set_env_cmd() {
            assert_eq!(set_env_cmd("FOO", "bar"), "export FOO='bar'");
        }

        #[test]
        fn test_set_env_cmd_quotes_spaces() {
            assert_eq!(
                set_env_cmd("MSG", "hello world"),
                "export MSG='hello world'"
            );
        }

        #[test]
        fn test_set_env_cmd_escapes_single_quotes() {
            assert_eq!(
                set_env_cmd("MSG", "it's"),
                r"export MSG='it'\''s'"
            );
        }

        #[test]
        fn test_unset_env_cmd() {
            assert_eq!(unset_env_cmd("FOO"), "unset FOO");
        }

        #[test]
        fn test_inline_prefix() {
            assert_eq!(
                format!("{}ls", inline_prefix("FOO", "bar")),
                "export FOO='bar' && ls"
            );
        }
    }

    #[cfg(windows)]
    mod windows {
        use super::*;

        #[test]
        fn test_set_env_cmd() {
            assert_eq!(set_env_cmd("FOO", "bar"), "$env:FOO = \"bar\"");
        }

        #[test]
        fn test_unset_env_cmd() {
            assert_eq!(
                unset_env_cmd("FOO"),
                "Remove-Item Env:\\FOO -ErrorAction SilentlyContinue"
            );
        }

        #[test]
        fn test_inline_prefix() {
            assert_eq!(
                format!("{}dir", inline_prefix("FOO", "bar")),
                "$env:FOO = \"bar\"; dir"
            );
        }
    }
}
