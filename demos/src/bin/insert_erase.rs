// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

// Walkthrough: insert, erase, resize and shrink through cursors.
//
// RUST_LOG=minivec=trace cargo run -p minivec-demos --bin insert_erase

fn main() -> Result<(), Box<dyn std::error::Error>> {
    minivec_demos::init_tracing();

    for line in minivec_demos::insert_erase()? {
        println!("{line}");
    }

    Ok(())
}
