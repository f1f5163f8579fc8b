//! Shared fixtures for the pipeline tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use sprout_adapters::{MemoryFilesystem, TracingReporter};
use sprout_core::{
    application::{
        ScaffoldService,
        ports::{PackageInstaller, Provisioned, TemplateProvisioner, VersionControl},
    },
    domain::{CommitMarker, Identity, PackageManager, TemplateSource},
    error::SproutResult,
};

pub const WORK: &str = "/work";
pub const COMMIT: &str = "0123456789abcdef";

pub const PACKAGE_JSON: &str = r#"{
  "name": "typescript-starter",
  "version": "10.1.1",
  "description": "A typescript starter for building javascript libraries and projects",
  "main": "build/main/index.js",
  "typings": "build/main/index.d.ts",
  "module": "build/module/index.js",
  "bin": {
    "typescript-starter": "./bin/typescript-starter"
  },
  "repository": "https://github.com/bitjson/typescript-starter",
  "license": "MIT",
  "keywords": ["typescript", "starter"],
  "scripts": {
    "build": "run-p build:*",
    "test": "run-s build test:*",
    "version": "standard-version"
  },
  "engines": { "node": ">=10" },
  "dependencies": {
    "@bitauth/libauth": "^1.17.1",
    "chalk": "^4.1.0",
    "execa": "^5.0.0"
  },
  "devDependencies": {
    "@ava/typescript": "^1.1.1",
    "@types/node": "^14.14.0",
    "ava": "^3.12.1",
    "prettier": "^2.1.1",
    "sinon": "^9.0.0",
    "typescript": "^4.0.2"
  },
  "ava": {
    "failFast": true,
    "timeout": "60s",
    "files": ["!build/module/**", "!build/main/cli/**"],
    "ignoredByWatcher": ["diff/**"]
  },
  "NOTE": "template only",
  "NOTE_2": "template only"
}
"#;

pub const GITIGNORE: &str = "node_modules\nbuild\ntest\ncoverage\n.nyc_output\ndiff\nyarn.lock\n";

pub const TSCONFIG: &str = r#"{
  "compilerOptions": {
    "target": "es2017",
    "lib": ["es2017", "dom"],
    "types": ["node"]
  }
}
"#;

pub const INDEX: &str = "export * from './lib/async';\n\
export * from './lib/hash';\n\
export * from './lib/hash.browser';\n\
export * from './lib/number';\n";

pub const README_STARTER: &str = "# [package-name]\n\n[description]\n\n## Usage\n";

pub const MODULES: &[&str] = &[
    "src/lib/async.ts",
    "src/lib/async.spec.ts",
    "src/lib/hash.ts",
    "src/lib/hash.spec.ts",
    "src/lib/hash.browser.ts",
    "src/lib/hash.browser.spec.ts",
    "src/lib/number.ts",
    "src/lib/number.spec.ts",
];

/// Project root for `name` under [`WORK`].
pub fn project(name: &str) -> PathBuf {
    Path::new(WORK).join(name)
}

/// Lay the template tree out at `root`.
pub fn seed_template(fs: &MemoryFilesystem, root: &Path) -> SproutResult<()> {
    let files: &[(&str, &str)] = &[
        ("package.json", PACKAGE_JSON),
        ("package-lock.json", "{}"),
        (".gitignore", GITIGNORE),
        ("tsconfig.json", TSCONFIG),
        ("src/index.ts", INDEX),
        ("README.md", "# typescript-starter\n"),
        ("README-starter.md", README_STARTER),
        ("CHANGELOG.md", "# Changelog\n"),
        ("bin/typescript-starter", "#!/usr/bin/env node\n"),
        ("src/cli/cli.ts", "export {};\n"),
        (".vscode/settings.json", "{}\n"),
        (".git/HEAD", "ref: refs/heads/master\n"),
    ];
    for (path, content) in files {
        fs.seed_file(root.join(path), *content)?;
    }
    for module in MODULES {
        fs.seed_file(root.join(module), "export {};\n")?;
    }
    Ok(())
}

/// Provisioner that lays the template out in a [`MemoryFilesystem`].
pub struct FixtureProvisioner {
    pub fs: MemoryFilesystem,
}

impl TemplateProvisioner for FixtureProvisioner {
    fn provision(
        &self,
        _source: &TemplateSource,
        working_dir: &Path,
        project_name: &str,
    ) -> SproutResult<Provisioned> {
        let root = working_dir.join(project_name);
        seed_template(&self.fs, &root)?;
        Ok(Provisioned {
            commit: CommitMarker::new(COMMIT),
            history_dir: root.join(".git"),
        })
    }
}

#[derive(Default)]
pub struct RecordingInstaller {
    pub calls: Mutex<Vec<(PackageManager, PathBuf)>>,
}

impl PackageInstaller for RecordingInstaller {
    fn install(&self, package_manager: PackageManager, project: &Path) -> SproutResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push((package_manager, project.to_path_buf()));
        Ok(())
    }
}

/// Records commits along with the files present when each was made.
pub struct RecordingVcs {
    fs: MemoryFilesystem,
    pub commits: Mutex<Vec<(String, PathBuf, Identity)>>,
    pub trees: Mutex<Vec<Vec<PathBuf>>>,
}

impl RecordingVcs {
    pub fn new(fs: MemoryFilesystem) -> Self {
        Self {
            fs,
            commits: Mutex::default(),
            trees: Mutex::default(),
        }
    }
}

impl VersionControl for RecordingVcs {
    fn initial_commit(
        &self,
        commit: &CommitMarker,
        project: &Path,
        identity: &Identity,
    ) -> SproutResult<()> {
        self.commits.lock().unwrap().push((
            commit.as_str().to_string(),
            project.to_path_buf(),
            identity.clone(),
        ));
        self.trees.lock().unwrap().push(self.fs.list_files());
        Ok(())
    }
}

/// A service wired to in-memory collaborators, plus handles to inspect them.
pub struct Harness {
    pub fs: MemoryFilesystem,
    pub installer: Arc<RecordingInstaller>,
    pub vcs: Arc<RecordingVcs>,
    pub service: ScaffoldService,
}

impl Harness {
    pub fn new() -> Self {
        let fs = MemoryFilesystem::new();
        let installer = Arc::new(RecordingInstaller::default());
        let vcs = Arc::new(RecordingVcs::new(fs.clone()));
        let service = ScaffoldService::new(
            Arc::new(fs.clone()),
            Box::new(FixtureProvisioner { fs: fs.clone() }),
            installer.clone(),
            vcs.clone(),
            Arc::new(TracingReporter),
        );
        Self {
            fs,
            installer,
            vcs,
            service,
        }
    }

    pub fn read(&self, name: &str, path: &str) -> String {
        self.fs
            .read_file(project(name).join(path))
            .unwrap_or_else(|| panic!("{path} missing"))
    }

    pub fn exists(&self, name: &str, path: &str) -> bool {
        use sprout_core::application::ports::Filesystem;
        self.fs.exists(&project(name).join(path))
    }
}
