//! Example: constrained LCS of two DNA fragments.
//!
//! Run with:
//! `cargo run --example clcs`

use clcs_dp::{oracle::is_feasible, ClcsEngine, ClcsEngineBuilder, ClcsProblem};

fn main() {
    let s = b"ACCGGTCGAGTGCGCGGAAGCCGGCCGAA";
    let t = b"GTCGTTCGGAATGCCGTTGCTCTGTAAA";

    let (plain, lcs) = ClcsEngine::new(ClcsProblem::new(s, t, b""))
        .run()
        .expect("default limit fits this instance");
    println!("LCS length: {}", plain.unwrap_or(0));
    println!("LCS: {}", String::from_utf8_lossy(&lcs));

    for constraint in [&b"GCGC"[..], b"TTTT", b"AAAAAAAAAA"] {
        let engine = ClcsEngineBuilder::new(ClcsProblem::new(s, t, constraint))
            .with_verification(true)
            .build()
            .expect("valid configuration");
        let (len, solution) = engine.run().expect("verified solve");
        let constraint = String::from_utf8_lossy(constraint);
        match len {
            Some(len) => {
                println!("CLCS containing {constraint}: length {len}");
                println!("  {}", String::from_utf8_lossy(&solution));
                assert!(is_feasible(s, t, engine.problem().c, &solution));
            }
            None => println!("CLCS containing {constraint}: infeasible"),
        }
    }
}
