//! Scenario: Hand-Written Barrel
//!
//! Journey: a project already has a curated `index.ts`. barrelsmith must
//! leave it alone, say so, and keep managing its own barrels.

use crate::common::*;

#[test]
fn scenario_hand_written_barrel_is_preserved() {
    let env = TestEnv::with_files(&[
        ("barrelsmith.toml", STAR_CONFIG),
        ("src/a/a.ts", ""),
        ("src/a/index.ts", HAND_WRITTEN_BARREL),
        ("src/b/b.ts", ""),
    ]);

    let result = env.run(&["generate"]);
    assert!(result.success, "{}", result.combined_output());
    assert_output_contains!(result, "CONFLICT  src/a/index.ts (hand-written)");

    assert_eq!(env.read("src/a/index.ts").unwrap(), HAND_WRITTEN_BARREL);
    assert_barrel!(env, "src/b/index.ts", [HEADER, "export * from './b';"]);

    // Conflicts are not drift once src/index.ts has picked up b/
    assert!(env.run(&["generate"]).success);
    let result = env.run(&["check"]);
    assert!(result.success, "{}", result.combined_output());

    let result = env.run(&["doctor"]);
    assert_output_contains!(result, "hand-written");
}
