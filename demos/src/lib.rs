// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Walkthrough programs for minivec.
//!
//! Each walkthrough returns the lines it prints so the binaries under `src/bin` and the
//! tests under `tests/` share one implementation.

use core::fmt::Display;

use minivec::{MiniVec, MiniVecError};

/// Installs a compact stderr subscriber driven by `RUST_LOG` (default `warn`).
///
/// `RUST_LOG=minivec=trace` shows every buffer relocation.
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .without_time()
        .init();
}

/// Formats `label` followed by every element, space separated.
pub fn render<T: Display>(label: &str, values: &[T]) -> String {
    let mut line = String::from(label);
    for value in values {
        line.push_str(&value.to_string());
        line.push(' ');
    }
    line
}

/// Append, index, sort, iterate, copy and move.
pub fn basic() -> Result<Vec<String>, MiniVecError> {
    let mut lines = Vec::new();
    let mut vec = MiniVec::new();

    for value in [10, 30, 20, 40] {
        vec.push_back(value)?;
    }
    lines.push(render("original: ", &vec));

    lines.push(format!("vec[2] = {}", vec[2]));
    vec[2] = 99;
    lines.push(render("after vec[2] = 99: ", &vec));

    vec.sort();
    lines.push(render("sorted: ", &vec));

    let view: &MiniVec<i32> = &vec;
    let mut walked = String::from("walked: ");
    for value in view {
        walked.push_str(&format!("{value} "));
    }
    lines.push(walked);

    let mut copy = vec.try_clone()?;
    lines.push(render("copy: ", &copy));

    let moved = copy.take();
    lines.push(render("moved: ", &moved));
    tracing::info!(source_len = copy.len(), "moved out of the copy");

    let mut assigned = MiniVec::new();
    assigned.try_assign_from(&vec)?;
    lines.push(render("copy-assigned: ", &assigned));

    let mut move_assigned = MiniVec::new();
    move_assigned.move_assign(&mut assigned);
    lines.push(render("move-assigned: ", &move_assigned));

    Ok(lines)
}

/// Insert, erase, resize and shrink.
pub fn insert_erase() -> Result<Vec<String>, MiniVecError> {
    let mut lines = Vec::new();
    let mut vec = MiniVec::new();

    for i in 0..5 {
        vec.push_back(i * 10)?;
    }
    lines.push(render("initial: ", &vec));

    let position = vec.begin_mut() + 2;
    position.insert(99)?;
    lines.push(render("insert(2, 99): ", &vec));

    let position = vec.begin_mut() + 3;
    position.erase();
    lines.push(render("erase(3): ", &vec));

    let first = vec.begin_mut() + 1;
    first.erase_to(3);
    lines.push(render("erase(1, 3): ", &vec));

    vec.resize(5, -1)?;
    lines.push(render("resize(5, -1): ", &vec));

    vec.resize_default(3)?;
    lines.push(render("resize(3): ", &vec));

    lines.push(format!("capacity before shrink: {}", vec.capacity()));
    vec.shrink_to_fit()?;
    lines.push(format!("capacity after shrink: {}", vec.capacity()));

    Ok(lines)
}
