use solo::{Computer, ComputerBuilder};

#[test]
fn test_gaming_pc_fields() {
    let pc = Computer::builder("Intel i9", "32GB")
        .graphics_card(true)
        .bluetooth(true)
        .build();

    assert_eq!(pc.cpu(), "Intel i9");
    assert_eq!(pc.ram(), "32GB");
    assert!(pc.has_graphics_card());
    assert!(pc.has_bluetooth());
}

#[test]
fn test_required_fields_only_defaults_to_false() {
    let pc = ComputerBuilder::new("Intel i9", "32GB").build();
    assert!(!pc.has_graphics_card());
    assert!(!pc.has_bluetooth());
}

#[test]
fn test_office_pc_display() {
    let pc = Computer::builder("Intel i5", "16GB")
        .graphics_card(false)
        .bluetooth(true)
        .build();
    assert_eq!(
        pc.to_string(),
        "Computer [CPU=Intel i5, RAM=16GB, GraphicsCard=false, Bluetooth=true]"
    );
}

#[test]
fn test_json_shape() {
    let pc = Computer::builder("Intel i9", "32GB").graphics_card(true).build();
    let json = serde_json::to_value(&pc).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "cpu": "Intel i9",
            "ram": "32GB",
            "graphicsCard": true,
            "bluetooth": false,
        })
    );

    // Optional parts may be omitted and default to absent.
    let parsed: Computer = serde_json::from_str(r#"{"cpu":"M2","ram":"8GB"}"#).unwrap();
    assert_eq!(parsed, Computer::builder("M2", "8GB").build());
}
