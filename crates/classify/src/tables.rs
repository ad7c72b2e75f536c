// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Language and framework indicator tables.
//!
//! A label is detected when any of its globs matches a file path, or when
//! any of its manifest rules matches a manifest's contents. Labels are
//! checked independently and may co-occur.

use crate::error::ClassifyError;
use crate::tree::FileTree;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::BTreeSet;

/// How a manifest file names a dependency
#[derive(Debug, Clone, Copy)]
pub enum ManifestRule {
    /// A `dependencies`/`devDependencies` key in `package.json` equal to, or
    /// starting with, the needle
    NpmDependency(&'static str),
    /// Case-insensitive substring of the named manifest's contents
    Mentions { manifest: &'static str, needle: &'static str },
}

#[derive(Debug, Clone, Copy)]
pub struct Indicator {
    pub label: &'static str,
    pub globs: &'static [&'static str],
    pub manifests: &'static [ManifestRule],
}

pub const LANGUAGES: &[Indicator] = &[
    Indicator {
        label: "JavaScript",
        globs: &["**/package.json", "**/*.js", "**/*.jsx", "**/*.ts", "**/*.tsx", "**/*.mjs"],
        manifests: &[],
    },
    Indicator {
        label: "Python",
        globs: &["**/requirements.txt", "**/setup.py", "**/pyproject.toml", "**/*.py"],
        manifests: &[],
    },
    Indicator { label: "Java", globs: &["**/pom.xml", "**/build.gradle", "**/*.java"], manifests: &[] },
    Indicator { label: "C#", globs: &["**/*.csproj", "**/*.sln", "**/*.cs"], manifests: &[] },
    Indicator { label: "PHP", globs: &["**/composer.json", "**/*.php"], manifests: &[] },
    Indicator { label: "Ruby", globs: &["**/Gemfile", "**/Rakefile", "**/*.rb"], manifests: &[] },
    Indicator { label: "Go", globs: &["**/go.mod", "**/go.sum", "**/*.go"], manifests: &[] },
    Indicator { label: "Rust", globs: &["**/Cargo.toml", "**/Cargo.lock", "**/*.rs"], manifests: &[] },
    Indicator { label: "Swift", globs: &["**/Package.swift", "**/*.swift"], manifests: &[] },
    Indicator { label: "Kotlin", globs: &["**/*.kt", "**/*.kts"], manifests: &[] },
];

pub const FRAMEWORKS: &[Indicator] = &[
    Indicator {
        label: "React",
        globs: &["**/*.jsx", "**/*.tsx"],
        manifests: &[ManifestRule::NpmDependency("react")],
    },
    Indicator {
        label: "Vue",
        globs: &["**/*.vue", "**/vue.config.js"],
        manifests: &[ManifestRule::NpmDependency("vue")],
    },
    Indicator {
        label: "Angular",
        globs: &["**/angular.json"],
        manifests: &[ManifestRule::NpmDependency("@angular/")],
    },
    Indicator {
        label: "Next.js",
        globs: &["**/next.config.js", "**/next.config.mjs", "**/next.config.ts"],
        manifests: &[ManifestRule::NpmDependency("next")],
    },
    Indicator {
        label: "Express",
        globs: &[],
        manifests: &[ManifestRule::NpmDependency("express")],
    },
    Indicator {
        label: "Spring Boot",
        globs: &["**/application.properties", "**/application.yml"],
        manifests: &[
            ManifestRule::Mentions { manifest: "pom.xml", needle: "spring-boot" },
            ManifestRule::Mentions { manifest: "build.gradle", needle: "spring-boot" },
        ],
    },
    Indicator {
        label: "Django",
        globs: &["**/manage.py"],
        manifests: &[ManifestRule::Mentions { manifest: "requirements.txt", needle: "django" }],
    },
    Indicator {
        label: "Flask",
        globs: &["**/wsgi.py"],
        manifests: &[ManifestRule::Mentions { manifest: "requirements.txt", needle: "flask" }],
    },
    Indicator {
        label: "Laravel",
        globs: &["**/artisan"],
        manifests: &[ManifestRule::Mentions { manifest: "composer.json", needle: "laravel/framework" }],
    },
    Indicator {
        label: "Rails",
        globs: &["**/config/application.rb"],
        manifests: &[ManifestRule::Mentions { manifest: "Gemfile", needle: "rails" }],
    },
];

/// Compiled form of an indicator table
#[derive(Debug)]
pub struct DetectionTable {
    rows: Vec<(Indicator, GlobSet)>,
}

impl DetectionTable {
    pub fn compile(indicators: &[Indicator]) -> Result<Self, ClassifyError> {
        let mut rows = Vec::with_capacity(indicators.len());
        for indicator in indicators {
            let mut builder = GlobSetBuilder::new();
            for pattern in indicator.globs {
                builder.add(Glob::new(pattern)?);
            }
            rows.push((*indicator, builder.build()?));
        }
        Ok(Self { rows })
    }

    pub fn detect(&self, tree: &FileTree) -> BTreeSet<String> {
        self.rows
            .iter()
            .filter(|(indicator, globs)| {
                tree.paths().any(|path| globs.is_match(path))
                    || indicator.manifests.iter().any(|rule| manifest_matches(tree, rule))
            })
            .map(|(indicator, _)| indicator.label.to_string())
            .collect()
    }
}

fn manifest_matches(tree: &FileTree, rule: &ManifestRule) -> bool {
    match rule {
        ManifestRule::NpmDependency(needle) => manifests_named(tree, "package.json")
            .any(|text| npm_dependencies(text).iter().any(|dep| npm_dependency_matches(dep, needle))),
        ManifestRule::Mentions { manifest, needle } => {
            manifests_named(tree, manifest).any(|text| text.to_ascii_lowercase().contains(needle))
        }
    }
}

/// Exact package name, or any package in a scope when `needle` ends in `/`.
fn npm_dependency_matches(dep: &str, needle: &str) -> bool {
    if needle.ends_with('/') {
        dep.starts_with(needle)
    } else {
        dep == needle
    }
}

fn manifests_named<'a>(tree: &'a FileTree, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    tree.iter().filter(move |e| e.file_name() == name).filter_map(|e| e.text.as_deref())
}

/// Dependency names from a `package.json`; unparseable manifests have none.
fn npm_dependencies(text: &str) -> Vec<String> {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(text) else {
        return Vec::new();
    };
    ["dependencies", "devDependencies", "peerDependencies"]
        .iter()
        .filter_map(|key| json.get(key).and_then(|v| v.as_object()))
        .flat_map(|deps| deps.keys().cloned())
        .collect()
}

#[cfg(test)]
#[path = "tables_tests.rs"]
mod tests;
