//! A minimal starter template laid out on disk.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use assert_cmd::Command;

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
    "typescript": "^4.0.2"
  },
  "ava": {
    "failFast": true,
    "files": ["!build/module/**", "!build/main/cli/**"]
  },
  "NOTE": "template only"
}
"#;

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

const FILES: &[(&str, &str)] = &[
    ("package.json", PACKAGE_JSON),
    ("package-lock.json", "{}"),
    (".gitignore", "node_modules\nbuild\ndiff\nyarn.lock\n"),
    ("tsconfig.json", TSCONFIG),
    ("src/index.ts", INDEX),
    ("README.md", "# typescript-starter\n"),
    ("README-starter.md", "# [package-name]\n\n[description]\n"),
    ("CHANGELOG.md", "# Changelog\n"),
    ("bin/typescript-starter", "#!/usr/bin/env node\n"),
    ("src/cli/cli.ts", "export {};\n"),
    (".vscode/settings.json", "{}\n"),
];

const MODULES: &[&str] = &["async", "hash", "hash.browser", "number"];

/// Write the template tree under `root`.
pub fn write_template(root: &Path) {
    for (path, content) in FILES {
        let path = root.join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    fs::create_dir_all(root.join("src/lib")).unwrap();
    for module in MODULES {
        for suffix in ["ts", "spec.ts"] {
            fs::write(
                root.join(format!("src/lib/{module}.{suffix}")),
                "export {};\n",
            )
            .unwrap();
        }
    }
}

/// The binary, isolated from the user's config and environment.
pub fn sprout(config_home: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sprout");
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}
