use anyhow::{anyhow, Context, Result};

pub fn parse_seed(seed: &str) -> Result<u64> {
    let s = seed.trim();
    if s.is_empty() {
        return Err(anyhow!("empty seed"));
    }
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u64::from_str_radix(&hex.replace('_', ""), 16)
            .with_context(|| format!("invalid hex seed: {s}"))
    } else {
        s.replace('_', "")
            .parse::<u64>()
            .with_context(|| format!("invalid decimal seed: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_and_hex() {
        assert_eq!(parse_seed("42").unwrap(), 42);
        assert_eq!(parse_seed(" 0xDEAD_BEEF ").unwrap(), 0xDEAD_BEEF);
        assert_eq!(parse_seed("0Xff").unwrap(), 255);
        assert_eq!(parse_seed("1_000").unwrap(), 1_000);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_seed("").is_err());
        assert!(parse_seed("0xzz").is_err());
        assert!(parse_seed("-1").is_err());
    }
}
