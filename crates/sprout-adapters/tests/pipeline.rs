//! End-to-end pipeline tests against an in-memory template tree.

mod common;

use std::sync::Arc;

use common::{Harness, WORK, project, seed_template};
use serde_json::{Value, json};
use sprout_adapters::MemoryFilesystem;
use sprout_core::{
    application::{ApplicationError, FeaturePruner, ports::Filesystem},
    domain::{DomainError, FeatureToggle, Identity, PackageManager, ProjectConfig, TemplateSource},
    error::SproutError,
};

fn demo() -> sprout_core::domain::ProjectConfigBuilder {
    ProjectConfig::builder()
        .project_name("demo")
        .description("A demo")
        .github_username("octo")
        .working_directory(WORK)
        .install_dependencies(false)
        .template(TemplateSource::git("https://github.com/bitjson/typescript-starter.git"))
}

fn manifest(h: &Harness) -> Value {
    serde_json::from_str(&h.read("demo", "package.json")).unwrap()
}

#[test]
fn demo_scenario_produces_a_node_library_without_dom_code() {
    let h = Harness::new();
    let report = h.service.scaffold(&demo().build().unwrap()).unwrap();

    assert_eq!(report.project_path, project("demo"));
    assert_eq!(report.commit.as_str(), common::COMMIT);
    assert!(!report.installed);
    assert!(!report.committed);

    let pkg = manifest(&h);
    assert_eq!(pkg["name"], json!("demo"));
    assert_eq!(pkg["version"], json!("1.0.0"));
    assert_eq!(pkg["description"], json!("A demo"));
    assert_eq!(pkg["repository"], json!("https://github.com/octo/demo"));
    assert_eq!(pkg["keywords"], json!([]));
    assert_eq!(pkg["dependencies"], json!({}));
    assert_eq!(
        pkg["devDependencies"],
        json!({
            "@ava/typescript": "^1.1.1",
            "ava": "^3.12.1",
            "prettier": "^2.1.1",
            "typescript": "^4.0.2"
        })
    );
    assert_eq!(pkg["ava"]["files"], json!(["!build/module/**"]));
    assert!(pkg["ava"].get("ignoredByWatcher").is_none());
    assert_eq!(pkg["license"], json!("MIT"));
    for key in ["bin", "NOTE", "NOTE_2"] {
        assert!(pkg.get(key).is_none(), "{key} should be gone");
    }

    assert!(!h.read("demo", ".gitignore").contains("diff"));
    assert!(h.read("demo", ".gitignore").contains("yarn.lock"));

    let tsconfig = h.read("demo", "tsconfig.json");
    assert!(tsconfig.contains(r#""lib": ["es2017"]"#));
    assert!(tsconfig.contains(r#""types": ["node"]"#));

    let index = h.read("demo", "src/index.ts");
    assert!(!index.contains("hash.browser"));
    assert!(index.contains("export * from './lib/async';"));
    assert!(index.contains("export * from './lib/hash';"));
    assert!(!h.exists("demo", "src/lib/hash.browser.ts"));
    assert!(!h.exists("demo", "src/lib/hash.browser.spec.ts"));
    assert!(h.exists("demo", "src/lib/hash.ts"));

    let readme = h.read("demo", "README.md");
    assert!(readme.starts_with("# demo\n\nA demo\n"));
    assert!(!h.exists("demo", "README-starter.md"));
    for gone in ["CHANGELOG.md", "package-lock.json", "bin", "src/cli", ".git"] {
        assert!(!h.exists("demo", gone), "{gone} should be removed");
    }
    assert!(h.exists("demo", ".vscode/settings.json"));
}

#[test]
fn disabling_runtime_typings_removes_runtime_modules() {
    let h = Harness::new();
    let config = demo().runtime_typings(false).dom_typings(true).build().unwrap();
    h.service.scaffold(&config).unwrap();

    let tsconfig = h.read("demo", "tsconfig.json");
    assert!(tsconfig.contains(r#""types": []"#));
    assert!(tsconfig.contains(r#""lib": ["es2017", "dom"]"#));

    assert_eq!(
        h.read("demo", "src/index.ts"),
        "export * from './lib/number';\n"
    );
    for module in ["async", "hash", "hash.browser"] {
        assert!(!h.exists("demo", &format!("src/lib/{module}.ts")));
        assert!(!h.exists("demo", &format!("src/lib/{module}.spec.ts")));
    }
    assert!(h.exists("demo", "src/lib/number.ts"));
    assert_eq!(manifest(&h)["dependencies"], json!({}));
}

#[test]
fn customized_identity_installs_and_commits() {
    let h = Harness::new();
    let config = demo()
        .identity(Identity::new("Ada Lovelace", "ada@example.com"))
        .install_dependencies(true)
        .package_manager(PackageManager::Yarn)
        .build()
        .unwrap();
    let report = h.service.scaffold(&config).unwrap();

    assert!(report.installed);
    assert!(report.committed);
    assert_eq!(
        *h.installer.calls.lock().unwrap(),
        vec![(PackageManager::Yarn, project("demo"))]
    );
    let commits = h.vcs.commits.lock().unwrap();
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].0, common::COMMIT);
    assert_eq!(commits[0].2.full_name, "Ada Lovelace");

    let ignore = h.read("demo", ".gitignore");
    assert!(ignore.contains("package-lock.json"));
    assert!(!ignore.contains("yarn.lock"));
    assert_eq!(
        manifest(&h)["scripts"]["reset-hard"],
        json!("git clean -dfx && git reset --hard && yarn")
    );
}

#[test]
fn editor_settings_removed_before_commit_when_not_kept() {
    let h = Harness::new();
    let config = demo()
        .identity(Identity::new("Ada Lovelace", "ada@example.com"))
        .keep_editor_config(false)
        .build()
        .unwrap();
    h.service.scaffold(&config).unwrap();

    assert!(!h.exists("demo", ".vscode"));
    assert!(!h.exists("demo", ".vscode/settings.json"));
    let trees = h.vcs.trees.lock().unwrap();
    assert_eq!(trees.len(), 1);
    assert!(
        trees[0].iter().all(|p| !p.starts_with(project("demo").join(".vscode"))),
        "editor settings were committed: {:?}",
        trees[0]
    );
}

#[test]
fn editor_settings_kept_by_default() {
    let h = Harness::new();
    h.service.scaffold(&demo().build().unwrap()).unwrap();
    assert!(h.exists("demo", ".vscode/settings.json"));
}

#[test]
fn half_customized_identity_does_not_commit() {
    let h = Harness::new();
    let config = demo()
        .identity(Identity::new("Ada Lovelace", "YOUR_EMAIL"))
        .build()
        .unwrap();
    let report = h.service.scaffold(&config).unwrap();

    assert!(!report.committed);
    assert!(h.vcs.commits.lock().unwrap().is_empty());
}

#[test]
fn existing_project_directory_is_left_alone() {
    let h = Harness::new();
    h.fs.seed_file(project("demo").join("keep.txt"), "mine").unwrap();

    let err = h.service.scaffold(&demo().build().unwrap()).unwrap_err();
    assert!(matches!(
        err,
        SproutError::Application(ApplicationError::ProjectExists { .. })
    ));
    assert_eq!(h.fs.list_files(), vec![project("demo").join("keep.txt")]);
}

fn seeded() -> MemoryFilesystem {
    let fs = MemoryFilesystem::new();
    seed_template(&fs, &project("demo")).unwrap();
    fs
}

#[test]
fn runtime_pruning_is_idempotent() {
    let fs = seeded();
    let pruner = FeaturePruner::new(Arc::new(fs.clone()));

    let first = pruner.prune_platform_feature(&project("demo"), false).unwrap();
    assert!(first.compiler_config_changed);
    assert_eq!(first.exports_removed, 3);
    assert_eq!(first.files_deleted.len(), 6);

    let snapshot: Vec<_> = fs
        .list_files()
        .into_iter()
        .map(|p| (fs.read_file(&p), p))
        .collect();
    let second = pruner.prune_platform_feature(&project("demo"), false).unwrap();
    assert!(second.is_noop());

    let after: Vec<_> = fs
        .list_files()
        .into_iter()
        .map(|p| (fs.read_file(&p), p))
        .collect();
    assert_eq!(snapshot, after);
}

#[test]
fn pruning_order_does_not_matter() {
    let dom_first = seeded();
    let pruner = FeaturePruner::new(Arc::new(dom_first.clone()));
    pruner.prune_dom_feature(&project("demo"), false).unwrap();
    pruner.prune_platform_feature(&project("demo"), false).unwrap();

    let runtime_first = seeded();
    let pruner = FeaturePruner::new(Arc::new(runtime_first.clone()));
    pruner.prune_platform_feature(&project("demo"), false).unwrap();
    pruner.prune_dom_feature(&project("demo"), false).unwrap();

    assert_eq!(dom_first.list_files(), runtime_first.list_files());
    for path in dom_first.list_files() {
        assert_eq!(dom_first.read_file(&path), runtime_first.read_file(&path));
    }
}

#[test]
fn drifted_compiler_config_aborts_without_writing() {
    let fs = seeded();
    let tsconfig = project("demo").join("tsconfig.json");
    fs.write_file(&tsconfig, "{ \"compilerOptions\": { \"lib\": [\"es2020\"] } }")
        .unwrap();
    let pruner = FeaturePruner::new(Arc::new(fs.clone()));

    let err = pruner
        .prune(&project("demo"), FeatureToggle::DomTypings, false)
        .unwrap_err();
    assert!(matches!(
        err,
        SproutError::Domain(DomainError::TemplateDrift { .. })
    ));
    assert_eq!(
        fs.read_file(project("demo").join("src/index.ts")).as_deref(),
        Some(common::INDEX)
    );
    assert!(fs.exists(&project("demo").join("src/lib/hash.browser.ts")));
}

#[test]
fn missing_export_for_present_module_is_drift() {
    let fs = seeded();
    fs.write_file(
        &project("demo").join("src/index.ts"),
        "export * from './lib/number';\n",
    )
    .unwrap();
    let pruner = FeaturePruner::new(Arc::new(fs.clone()));

    let err = pruner.prune_dom_feature(&project("demo"), false).unwrap_err();
    assert!(matches!(
        err,
        SproutError::Domain(DomainError::TemplateDrift { .. })
    ));
    assert!(fs
        .read_file(project("demo").join("tsconfig.json"))
        .unwrap()
        .contains("\"dom\""));
}
