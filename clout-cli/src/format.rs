use console::Style;
use clout_types::primitives::PublicKeyBytes;

// ── Styles ──────────────────────────────────────────────────────────────────

pub fn style_success() -> Style {
    Style::new().green()
}

pub fn style_error() -> Style {
    Style::new().red()
}

pub fn style_warn() -> Style {
    Style::new().yellow()
}

pub fn style_info() -> Style {
    Style::new().cyan()
}

pub fn style_bold() -> Style {
    Style::new().bold()
}

pub fn style_dim() -> Style {
    Style::new().dim()
}

// ── Value formatting ────────────────────────────────────────────────────────

/// Hex-encode a compressed public key.
pub fn format_pubkey(pk: &PublicKeyBytes) -> String {
    hex::encode(pk)
}

// ── Messages ────────────────────────────────────────────────────────────────

/// Print a success message with a check mark.
pub fn print_success(msg: &str) {
    println!("  {} {}", style_success().apply_to("✓"), msg);
}

/// Print an error message with a hint.
pub fn print_error(msg: &str, hint: Option<&str>) {
    eprintln!("  {} {}", style_error().apply_to("Error:"), msg);
    if let Some(h) = hint {
        eprintln!(
            "  {} {}",
            style_dim().apply_to("Hint:"),
            style_dim().apply_to(h)
        );
    }
}

/// Print a freshly generated phrase inside a warning box, four words a row.
pub fn print_mnemonic_box(words: &[&str]) {
    let warn = style_warn();
    let bold = style_bold();

    println!();
    println!(
        "  {}",
        warn.apply_to("╔══════════════════════════════════════════════════════════════╗")
    );
    println!(
        "  {}",
        warn.apply_to("║  IMPORTANT: Write down these 12 words.                       ║")
    );
    println!(
        "  {}",
        warn.apply_to("║  Anyone holding them controls this account.                  ║")
    );
    println!(
        "  {}",
        warn.apply_to("╠══════════════════════════════════════════════════════════════╣")
    );
    for line in mnemonic_rows(words) {
        println!("  {}{}{}", warn.apply_to("║"), bold.apply_to(line), warn.apply_to("║"));
    }
    println!(
        "  {}",
        warn.apply_to("╚══════════════════════════════════════════════════════════════╝")
    );
    println!();
}

const BOX_INNER_WIDTH: usize = 62;

fn mnemonic_rows(words: &[&str]) -> Vec<String> {
    words
        .chunks(4)
        .enumerate()
        .map(|(row, chunk)| {
            let mut line = String::from("  ");
            for (i, word) in chunk.iter().enumerate() {
                line.push_str(&format!("{:>2}. {:<10}", row * 4 + i + 1, word));
                if i < chunk.len() - 1 {
                    line.push(' ');
                }
            }
            let padding = BOX_INNER_WIDTH.saturating_sub(line.chars().count());
            line.push_str(&" ".repeat(padding));
            line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mnemonic_rows_numbered_and_padded() {
        let words = [
            "outside", "seven", "reunion", "sniff", "mimic", "skull", "pulp", "twist", "twice",
            "elegant", "replace", "luggage",
        ];
        let rows = mnemonic_rows(&words);
        assert_eq!(rows.len(), 3);
        assert!(rows[0].contains(" 1. outside"));
        assert!(rows[2].contains("12. luggage"));
        for row in &rows {
            assert_eq!(row.chars().count(), BOX_INNER_WIDTH);
        }
    }

    #[test]
    fn test_format_pubkey() {
        let mut pk = [0u8; 33];
        pk[0] = 0x02;
        assert_eq!(format_pubkey(&pk), format!("02{}", "00".repeat(32)));
    }
}
