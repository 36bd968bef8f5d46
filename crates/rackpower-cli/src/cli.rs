//! CLI argument definitions using clap.

use clap::Parser;

/// Remote power control via PDU outlets and IPMI
#[derive(Parser, Debug)]
#[command(name = "rackpower")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Name of host in the registry
    #[arg(long)]
    pub host: String,

    /// Turn host on
    #[arg(long, conflicts_with = "off")]
    pub on: bool,

    /// Turn host off
    #[arg(long)]
    pub off: bool,

    /// Verbose debugging output
    #[arg(long)]
    pub debug: bool,

    /// Render the status summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_the_default_operation() {
        let cli = Cli::try_parse_from(["rackpower", "--host", "h1"]).unwrap();
        assert_eq!(cli.host, "h1");
        assert!(!cli.on);
        assert!(!cli.off);
    }

    #[test]
    fn test_host_is_required() {
        assert!(Cli::try_parse_from(["rackpower", "--on"]).is_err());
    }

    #[test]
    fn test_on_and_off_are_mutually_exclusive() {
        assert!(Cli::try_parse_from(["rackpower", "--host", "h1", "--on", "--off"]).is_err());
        assert!(Cli::try_parse_from(["rackpower", "--host", "h1", "--on"]).is_ok());
        assert!(Cli::try_parse_from(["rackpower", "--host", "h1", "--off"]).is_ok());
    }
}
