//! Password Hash Generator
//!
//! Prints bcrypt hashes for seeding `accounts.password_hash`.
//!
//! ```text
//! cargo run --bin hash_password -- admin123 secret123
//! BCRYPT_COST=12 cargo run --bin hash_password -- admin123
//! ```

use std::env;

use anyhow::Context;
use platform::password::{ClearTextPassword, DEFAULT_COST};

fn main() -> anyhow::Result<()> {
    let cost = match env::var("BCRYPT_COST") {
        Ok(raw) => raw
            .trim()
            .parse::<u32>()
            .with_context(|| format!("Invalid BCRYPT_COST={raw:?}"))?,
        Err(_) => DEFAULT_COST,
    };

    let passwords: Vec<String> = env::args().skip(1).collect();
    if passwords.is_empty() {
        anyhow::bail!("usage: hash_password <password> [<password> ...]");
    }

    for raw in passwords {
        let hash = ClearTextPassword::new(raw.as_str())
            .hash(cost)
            .with_context(|| format!("Failed to hash {raw:?}"))?;
        println!("{raw}\t{}", hash.as_str());
    }

    Ok(())
}
