use proptest::prelude::*;
use solo::Computer;

#[derive(Debug, Clone)]
enum Step {
    GraphicsCard(bool),
    Bluetooth(bool),
}

proptest! {
    #[test]
    fn test_builder_matches_last_written_options(
        cpu in "[A-Za-z0-9 ]{1,16}",
        ram in "[0-9]{1,3}GB",
        steps in proptest::collection::vec(
            prop_oneof![
                any::<bool>().prop_map(Step::GraphicsCard),
                any::<bool>().prop_map(Step::Bluetooth),
            ],
            0..8
        )
    ) {
        let mut expected_gpu = false;
        let mut expected_bt = false;
        let mut builder = Computer::builder(cpu.clone(), ram.clone());

        for step in steps {
            builder = match step {
                Step::GraphicsCard(on) => {
                    expected_gpu = on;
                    builder.graphics_card(on)
                }
                Step::Bluetooth(on) => {
                    expected_bt = on;
                    builder.bluetooth(on)
                }
            };
        }

        let pc = builder.build();
        prop_assert_eq!(pc.cpu(), cpu.as_str());
        prop_assert_eq!(pc.ram(), ram.as_str());
        prop_assert_eq!(pc.has_graphics_card(), expected_gpu);
        prop_assert_eq!(pc.has_bluetooth(), expected_bt);
        prop_assert_eq!(
            pc.to_string(),
            format!("Computer [CPU={cpu}, RAM={ram}, GraphicsCard={expected_gpu}, Bluetooth={expected_bt}]")
        );
    }
}
