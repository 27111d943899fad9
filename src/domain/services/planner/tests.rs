use super::*;
use std::cell::RefCell;

use crate::config::{ModuleGlob, ResolvedRule};
use crate::domain::entities::{ActionKind, ExportStyle};
use crate::domain::ports::MockFileSystem;
use crate::domain::value_objects::{ExtensionSetting, OWNERSHIP_HEADER};
use crate::error::BarrelError;

fn cwd() -> &'static Path {
    Path::new("/p")
}

fn config(rules: Vec<ResolvedRule>) -> ResolvedConfig {
    ResolvedConfig {
        extensions: ExtensionSetting::None,
        rules,
        ..ResolvedConfig::default()
    }
}

fn namespace_rule(dirs: &str) -> ResolvedRule {
    ResolvedRule::new(dirs).with_modules(vec![ModuleGlob {
        include: "./*".into(),
        style: ExportStyle::Namespace,
    }])
}

#[test]
fn scenario_a_star_create() {
    let fs = MockFileSystem::new()
        .with_file("/p/src/auth.ts", "")
        .with_file("/p/src/billing.ts", "");

    let result = plan(&config(vec![ResolvedRule::new("src")]), cwd(), &fs);

    assert!(result.errors.is_empty());
    assert_eq!(result.actions.len(), 1);
    let action = &result.actions[0];
    assert_eq!(action.kind(), ActionKind::Create);
    assert_eq!(action.path(), Path::new("/p/src/index.ts"));
    assert_eq!(
        action.content(),
        Some(
            format!(
                "{OWNERSHIP_HEADER}export * from './auth';\nexport * from './billing';\n"
            )
            .as_str()
        )
    );
}

#[test]
fn scenario_b_namespace_create() {
    let fs = MockFileSystem::new()
        .with_file("/p/src/auth.ts", "")
        .with_file("/p/src/billing.ts", "");

    let result = plan(&config(vec![namespace_rule("src")]), cwd(), &fs);

    let content = result.actions[0].content().unwrap();
    assert!(content.contains("export * as Auth from './auth'"));
    assert!(content.contains("export * as Billing from './billing'"));
}

#[test]
fn scenario_c_header_only_is_updated() {
    let fs = MockFileSystem::new()
        .with_file("/p/src/index.ts", OWNERSHIP_HEADER)
        .with_file("/p/src/auth.ts", "");

    let result = plan(&config(vec![ResolvedRule::new("src")]), cwd(), &fs);
    assert_eq!(result.actions[0].kind(), ActionKind::Update);

    let written = execute(&result, &fs, None).unwrap();
    assert_eq!(written, vec![PathBuf::from("/p/src/index.ts")]);
    assert_eq!(
        fs.content("/p/src/index.ts").unwrap(),
        format!("{OWNERSHIP_HEADER}export * from './auth';\n")
    );
}

#[test]
fn scenario_d_hand_written_is_never_touched() {
    let hand_written = "export * from './auth';\n";
    let fs = MockFileSystem::new()
        .with_file("/p/src/index.ts", hand_written)
        .with_file("/p/src/auth.ts", "")
        .with_file("/p/src/billing.ts", "");

    let result = plan(&config(vec![ResolvedRule::new("src")]), cwd(), &fs);
    assert_eq!(result.actions[0].kind(), ActionKind::Conflict);

    let written = execute(&result, &fs, None).unwrap();
    assert!(written.is_empty());
    assert!(fs.writes().is_empty());
    assert_eq!(fs.content("/p/src/index.ts").unwrap(), hand_written);
}

#[test]
fn scenario_e_collision_fails_only_that_directory() {
    let fs = MockFileSystem::new()
        .with_file("/p/src/a/foo-bar.ts", "")
        .with_file("/p/src/a/foo_bar.ts", "")
        .with_file("/p/src/b/ok.ts", "");

    let result = plan(&config(vec![namespace_rule("src/*")]), cwd(), &fs);

    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].directory, PathBuf::from("/p/src/a"));
    assert!(matches!(
        result.errors[0].error,
        BarrelError::NamespaceCollision { .. }
    ));
    assert_eq!(result.actions.len(), 1);
    assert_eq!(result.actions[0].path(), Path::new("/p/src/b/index.ts"));

    execute(&result, &fs, None).unwrap();
    assert!(fs.content("/p/src/a/index.ts").is_none());
}

#[test]
fn scenario_f_extension_modes() {
    let fs = MockFileSystem::new().with_file("/p/src/utils.mts", "");

    let mut cfg = config(vec![ResolvedRule::new("src")]);
    cfg.extensions = ExtensionSetting::Js;
    let js = plan(&cfg, cwd(), &fs);
    assert!(js.actions[0]
        .content()
        .unwrap()
        .contains("export * from './utils.mjs';"));

    cfg.extensions = ExtensionSetting::Ts;
    let ts = plan(&cfg, cwd(), &fs);
    assert!(ts.actions[0]
        .content()
        .unwrap()
        .contains("export * from './utils.mts';"));
}

#[test]
fn plan_execute_plan_is_idempotent() {
    let fs = MockFileSystem::new()
        .with_file("/p/src/auth.ts", "")
        .with_file("/p/src/features/login/index.ts", OWNERSHIP_HEADER)
        .with_file("/p/src/features/login/form.tsx", "")
        .with_file("/p/src/features/index.ts", "// hand-written\n");

    let cfg = config(vec![ResolvedRule::new("src/**")]);
    let first = plan(&cfg, cwd(), &fs);
    execute(&first, &fs, None).unwrap();

    let second = plan(&cfg, cwd(), &fs);
    assert!(second.errors.is_empty());
    assert!(!second.is_stale());
    assert_eq!(second.count(ActionKind::Conflict), 1);
    assert_eq!(second.count(ActionKind::Skip), 2);
}

#[test]
fn execute_calls_hook_before_each_write() {
    let fs = MockFileSystem::new()
        .with_file("/p/a/x.ts", "")
        .with_file("/p/b/y.ts", "");
    let result = plan(&config(vec![ResolvedRule::new("*")]), cwd(), &fs);

    let seen = RefCell::new(Vec::new());
    let hook = |path: &Path| {
        assert!(fs.content(path).is_none(), "hook must run before the write");
        seen.borrow_mut().push(path.to_path_buf());
    };
    let written = execute(&result, &fs, Some(&hook)).unwrap();

    assert_eq!(seen.into_inner(), written);
    assert_eq!(written.len(), 2);
}

#[test]
fn subdirectory_barrels_are_re_exported() {
    let fs = MockFileSystem::new()
        .with_file("/p/src/a.ts", "")
        .with_file("/p/src/components/button.tsx", "");

    let cfg = config(vec![ResolvedRule::new("src/**")]);
    let first = plan(&cfg, cwd(), &fs);
    // components/index.ts does not exist yet, so src/index.ts only lists a.ts
    let src = first
        .actions
        .iter()
        .find(|a| a.path() == Path::new("/p/src/index.ts"))
        .unwrap();
    assert!(!src.content().unwrap().contains("components"));

    execute(&first, &fs, None).unwrap();
    let second = plan(&cfg, cwd(), &fs);
    let src = second
        .actions
        .iter()
        .find(|a| a.path() == Path::new("/p/src/index.ts"))
        .unwrap();
    assert_eq!(src.kind(), ActionKind::Update);
    assert!(src
        .content()
        .unwrap()
        .contains("export * from './components';"));
}

#[test]
fn overlapping_rules_plan_each_directory_once() {
    let fs = MockFileSystem::new().with_file("/p/src/a.ts", "");
    let cfg = config(vec![ResolvedRule::new("src"), namespace_rule("src/**")]);

    let result = plan(&cfg, cwd(), &fs);
    assert_eq!(result.actions.len(), 1);
    assert!(result.actions[0]
        .content()
        .unwrap()
        .contains("export * from './a';"));
}

#[test]
fn invalid_rule_glob_is_reported_per_rule() {
    let fs = MockFileSystem::new().with_file("/p/src/a.ts", "");
    let cfg = config(vec![ResolvedRule::new("src/["), ResolvedRule::new("src")]);

    let result = plan(&cfg, cwd(), &fs);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].directory, PathBuf::from("rule(src/[)"));
    assert_eq!(result.actions.len(), 1);
}

#[test]
fn cache_hit_reuses_rendered_content() {
    let fs = MockFileSystem::new().with_file("/p/src/a.ts", "");
    let cfg = config(vec![ResolvedRule::new("src")]);

    let (_, mut cache) = plan_cached(&cfg, cwd(), &fs, None);
    assert!(cache.lookup("src", &["a.ts".to_string()]).is_some());

    // A doctored entry proves the cached text is used verbatim.
    let doctored = format!("{OWNERSHIP_HEADER}export * from './cached';\n");
    cache.insert("src", vec!["a.ts".to_string()], doctored.clone());

    let (result, next) = plan_cached(&cfg, cwd(), &fs, Some(&cache));
    assert_eq!(result.actions[0].content(), Some(doctored.as_str()));
    assert_eq!(next.lookup("src", &["a.ts".to_string()]), Some(doctored.as_str()));
}

#[test]
fn cache_miss_on_file_list_change() {
    let fs = MockFileSystem::new().with_file("/p/src/a.ts", "");
    let cfg = config(vec![ResolvedRule::new("src")]);
    let (_, cache) = plan_cached(&cfg, cwd(), &fs, None);

    let fs = fs.with_file("/p/src/b.ts", "");
    let (result, next) = plan_cached(&cfg, cwd(), &fs, Some(&cache));
    assert!(result.actions[0]
        .content()
        .unwrap()
        .contains("export * from './b';"));
    assert_eq!(
        next.directories["src"].files,
        vec!["a.ts".to_string(), "b.ts".to_string()]
    );
}

#[test]
fn cache_is_ignored_when_config_changes() {
    let fs = MockFileSystem::new().with_file("/p/src/a.ts", "");
    let cfg = config(vec![ResolvedRule::new("src")]);
    let (_, mut cache) = plan_cached(&cfg, cwd(), &fs, None);
    cache.insert("src", vec!["a.ts".to_string()], "stale".to_string());

    let mut changed = cfg.clone();
    changed.exclude.push("*.gen.ts".to_string());
    let (result, _) = plan_cached(&changed, cwd(), &fs, Some(&cache));
    assert_ne!(result.actions[0].content(), Some("stale"));
}

#[test]
fn cached_directory_still_plans_against_disk() {
    let fs = MockFileSystem::new().with_file("/p/src/a.ts", "");
    let cfg = config(vec![ResolvedRule::new("src")]);
    let (first, cache) = plan_cached(&cfg, cwd(), &fs, None);
    execute(&first, &fs, None).unwrap();

    let (second, _) = plan_cached(&cfg, cwd(), &fs, Some(&cache));
    assert_eq!(second.actions[0].kind(), ActionKind::Skip);
}
