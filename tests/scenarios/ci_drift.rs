//! Scenario: CI Drift Detection
//!
//! Journey: a teammate adds a module without regenerating barrels.
//! `barrelsmith check` fails in CI with a diff; regenerating fixes it.

use crate::common::*;

fn project() -> TestEnv {
    TestEnv::with_files(&[
        ("barrelsmith.toml", STAR_CONFIG),
        ("src/utils/format.ts", "export const format = 1;\n"),
    ])
}

/// `src/index.ts` picks up `utils/` once `src/utils/index.ts` exists
fn generate_converged(env: &TestEnv) {
    assert!(env.run(&["generate"]).success);
    assert!(env.run(&["generate"]).success);
}

#[test]
fn scenario_new_module_is_caught_by_check() {
    let env = project();
    generate_converged(&env);
    assert!(env.run(&["check"]).success);

    // Teammate adds a module and forgets to regenerate
    env.write("src/utils/parse.ts", "export const parse = 1;\n");

    let result = env.run(&["check", "--diff"]);
    assert_eq!(result.exit_code, 1, "stale barrel must fail check");
    assert_output_contains!(result, "stale");
    assert_output_contains!(result, "+export * from './parse';");
    assert_output_contains!(result, "barrelsmith generate");

    // Check never writes
    let barrel = env.read("src/utils/index.ts").unwrap();
    assert!(!barrel.contains("parse"));

    assert!(env.run(&["generate"]).success);
    assert!(env.run(&["check"]).success);
    assert_barrel!(
        env,
        "src/utils/index.ts",
        ["export * from './format';", "export * from './parse';"]
    );
}

#[test]
fn scenario_removed_module_is_caught_by_check() {
    let env = project();
    env.write("src/utils/parse.ts", "");
    generate_converged(&env);

    env.remove("src/utils/parse.ts");
    let result = env.run(&["check", "--diff"]);
    assert_eq!(result.exit_code, 1);
    assert_output_contains!(result, "-export * from './parse';");
}
