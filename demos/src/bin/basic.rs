// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

// Walkthrough: append, index, sort, iterate, copy and move.
//
// RUST_LOG=minivec=trace cargo run -p minivec-demos --bin basic

fn main() -> Result<(), Box<dyn std::error::Error>> {
    minivec_demos::init_tracing();

    for line in minivec_demos::basic()? {
        println!("{line}");
    }

    Ok(())
}
