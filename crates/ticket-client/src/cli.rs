//! Command-line arguments for `ticket-kiosk`.

use clap::Parser;

/// Terminal kiosk for buying a concert ticket
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct KioskArgs {
    /// Send the confirmation email in-process through Resend (needs
    /// RESEND_API_KEY) instead of posting to the gateway
    #[arg(long)]
    pub local: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_gateway() {
        let args = KioskArgs::try_parse_from(["ticket-kiosk"]).unwrap();
        assert!(!args.local);
    }

    #[test]
    fn test_local_flag() {
        let args = KioskArgs::try_parse_from(["ticket-kiosk", "--local"]).unwrap();
        assert!(args.local);
    }

    #[test]
    fn test_rejects_unknown_flags() {
        assert!(KioskArgs::try_parse_from(["ticket-kiosk", "--locl"]).is_err());
        assert!(KioskArgs::try_parse_from(["ticket-kiosk", "local"]).is_err());
    }
}
