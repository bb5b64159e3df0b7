//! Builder Usage
//!
//! Builds the two machines from the classic builder example.

use solo::Computer;

fn main() {
    let gaming_pc = Computer::builder("Intel i9", "32GB")
        .graphics_card(true)
        .bluetooth(true)
        .build();

    let office_pc = Computer::builder("Intel i5", "16GB")
        .graphics_card(false)
        .bluetooth(true)
        .build();

    println!("{gaming_pc}");
    println!("{office_pc}");
}
