// generate_key.rs
// Prints a fresh pair of encryption keys for deployments that do not use a .env file

#[path = "services/key_material.rs"]
mod key_material;

use key_material::{generate_key, is_valid_key, KEY_LEN};

const KEY_NAMES: [&str; 2] = ["CB_ENCRYPTION_KEY_DEV", "CB_ENCRYPTION_KEY"];

fn main() {
    println!("{} random bytes per key, hex encoded\n", KEY_LEN);

    for name in KEY_NAMES {
        let key = generate_key();
        debug_assert!(is_valid_key(&key));
        println!("{}={}", name, key);
    }

    println!();
    println!("Set both variables in your deployment platform (e.g. the Render dashboard).");
    println!("Local development does not need this: `keysetup` writes them to .env.");
    println!("Changing a key makes data encrypted with the old one unreadable.");
}
