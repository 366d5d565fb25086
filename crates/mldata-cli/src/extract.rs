//! Pre-parse extraction of the `--extra` flag.
//!
//! The set of valid subcommands (one per dataset) must be known before the
//! main parser is constructed, so any registry-extending flag has to be
//! resolved first. This runs ahead of clap and removes the flag it consumed.

/// Token that names an extra downloader registry on the command line.
pub const EXTRA_FLAG: &str = "--extra";

/// Extract the first `--extra <name>` pair from `args`.
///
/// Removes both tokens and returns the registry name. When `--extra` is the
/// last token the list is left unchanged and the main parser later reports
/// the missing value as a usage error.
pub fn extract_extra(args: &mut Vec<String>) -> Option<String> {
    let ix = args.iter().position(|arg| arg == EXTRA_FLAG)?;
    if ix + 1 >= args.len() {
        return None;
    }
    let name = args.remove(ix + 1);
    args.remove(ix);
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|token| token.to_string()).collect()
    }

    #[test]
    fn removes_flag_and_value_from_the_argument_list() {
        let mut argv = args(&["--extra", "mymodule", "somecmd", "-d", "/tmp"]);
        let extracted = extract_extra(&mut argv);

        assert_eq!(extracted.as_deref(), Some("mymodule"));
        assert_eq!(argv, args(&["somecmd", "-d", "/tmp"]));
    }

    #[test]
    fn dangling_flag_leaves_the_arguments_unchanged() {
        let mut argv = args(&["--extra"]);
        let extracted = extract_extra(&mut argv);

        assert_eq!(extracted, None);
        assert_eq!(argv, args(&["--extra"]));
    }

    #[test]
    fn dangling_flag_after_a_subcommand_is_also_left_alone() {
        let mut argv = args(&["somecmd", "--extra"]);
        let extracted = extract_extra(&mut argv);

        assert_eq!(extracted, None);
        assert_eq!(argv, args(&["somecmd", "--extra"]));
    }

    #[test]
    fn absent_flag_returns_none() {
        let mut argv = args(&["somecmd", "-d", "/tmp"]);
        let extracted = extract_extra(&mut argv);

        assert_eq!(extracted, None);
        assert_eq!(argv, args(&["somecmd", "-d", "/tmp"]));
    }

    #[test]
    fn only_the_first_occurrence_is_consumed() {
        let mut argv = args(&["--extra", "first", "--extra", "second"]);
        let extracted = extract_extra(&mut argv);

        assert_eq!(extracted.as_deref(), Some("first"));
        assert_eq!(argv, args(&["--extra", "second"]));
    }
}
