//! Scenario: First-Time User Setup
//!
//! Journey: a developer adds barrelsmith to an existing TypeScript project.
//!
//! Steps:
//! 1. Runs `barrelsmith generate` with no config and is pointed at `init`
//! 2. Runs `barrelsmith init`
//! 3. Generates barrels for every directory under `src/`
//! 4. `barrelsmith check` passes in CI

use crate::common::*;

#[test]
fn scenario_first_time_user_complete_journey() {
    let env = TestEnv::with_files(&[
        ("src/auth/login.ts", "export const login = () => {};\n"),
        ("src/auth/login.test.ts", ""),
        ("src/billing/invoice.ts", "export type Invoice = {};\n"),
    ]);

    // Step 1: no config yet
    let result = env.run(&["generate"]);
    assert!(!result.success, "generate without config must fail");
    assert_output_contains!(result, "barrelsmith init");

    // Step 2
    let result = env.run(&["init"]);
    assert!(result.success, "init failed:\n{}", result.combined_output());
    assert!(env.project_path("barrelsmith.toml").exists());

    // Step 3: keep the run hermetic
    env.write(
        "barrelsmith.toml",
        &env.read("barrelsmith.toml")
            .unwrap()
            .replace("formatter = \"auto\"", "formatter = false")
            .replace("extensions = \"auto\"", "extensions = \"none\""),
    );
    let result = env.run(&["generate"]);
    assert!(result.success, "generate failed:\n{}", result.combined_output());
    assert_output_contains!(result, "CREATE");

    assert_barrel!(env, "src/auth/index.ts", [HEADER, "export * from './login';"]);
    assert_barrel!(env, "src/billing/index.ts", ["export * from './invoice';"]);
    let auth = env.read("src/auth/index.ts").unwrap();
    assert!(!auth.contains("login.test"), "test files are excluded:\n{auth}");

    // Step 4: a second generate converges and check agrees
    env.run(&["generate"]);
    let result = env.run(&["check"]);
    assert!(result.success, "check failed:\n{}", result.combined_output());
    assert_output_contains!(result, "up-to-date");
}
