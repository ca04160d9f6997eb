//! Run drivers: the two-phase docs run and the scaffold run.
//!
//! Phase one walks every unit and builds the cross-reference index from all
//! classes. Phase two composes pages against that finished index and writes
//! them. A page that fails is recorded in the [`Report`] and its siblings
//! are still written.

use crate::ast::TranslationUnit;
use crate::error::{PageError, ProviderError};
use crate::model::{Declarations, Decl, Filter};
use crate::overload::OverloadSet;
use crate::page::{class_page, function_page, ClassScope, PageContext};
use crate::render::{create_renderer, Page, Renderer};
use crate::scaffold::unit_scaffold;
use crate::xref::XrefIndex;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct DocsConfig {
    pub output_dir: PathBuf,
    pub examples_dir: PathBuf,
    /// `file: None` restricts each unit to its own file.
    pub filter: Filter,
    /// `rst` or `json`.
    pub format: String,
}

#[derive(Debug, Clone)]
pub struct ScaffoldConfig {
    pub output: PathBuf,
    pub filter: Filter,
}

/// Outcome of a docs run.
#[derive(Debug, Default)]
pub struct Report {
    pub written: Vec<PathBuf>,
    /// Page path and the error that aborted it.
    pub failed: Vec<(String, PageError)>,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Load every declaration tree; the first failure aborts.
pub fn load_units(paths: &[PathBuf]) -> Result<Vec<TranslationUnit>, ProviderError> {
    paths.iter().map(|p| TranslationUnit::load(p)).collect()
}

fn unit_filters(units: &[TranslationUnit], filter: &Filter) -> Vec<Filter> {
    units
        .iter()
        .map(|unit| Filter::for_unit(unit, filter.file.as_deref(), &filter.namespaces))
        .collect()
}

/// Classes of every unit, in unit then declaration order.
fn collect_classes<'a>(units: &'a [TranslationUnit], filters: &'a [Filter]) -> Vec<Decl<'a>> {
    units
        .iter()
        .zip(filters)
        .flat_map(|(unit, filter)| Declarations::new(&unit.root, filter).classes())
        .collect()
}

/// Compose every page of the run against a finished index.
///
/// Each entry is a page or the error that aborted it, keyed by the page's
/// declaration name.
pub fn build_pages(
    units: &[TranslationUnit],
    filter: &Filter,
    index: &XrefIndex,
    examples_dir: &Path,
) -> Vec<(String, Result<Page, PageError>)> {
    let filters = unit_filters(units, filter);
    let ctx = PageContext {
        index,
        examples_dir,
    };
    let mut pages = Vec::new();

    for class in collect_classes(units, &filters) {
        let scope = ClassScope::of(&class);
        pages.push((class.qualified_name(), class_page(&class, &scope, &ctx)));
        for (name, overloads) in scope.overloads.iter() {
            let declaration = format!("{}::{}", class.qualified_name(), name);
            pages.push((declaration, function_page(name, overloads, &ctx)));
        }
    }

    let functions = OverloadSet::from_decls(
        units
            .iter()
            .zip(&filters)
            .flat_map(|(unit, filter)| Declarations::new(&unit.root, filter).functions()),
    );
    for (name, overloads) in functions.iter() {
        let declaration = overloads
            .first()
            .map(|d| d.qualified_name())
            .unwrap_or_else(|| name.to_string());
        pages.push((declaration, function_page(name, overloads, &ctx)));
    }
    reject_duplicate_paths(&mut pages);
    pages
}

/// Fail every page whose path an earlier page of the run already claimed.
///
/// Page paths drop namespaces, so `a::Foo` and `b::Foo` (or a class and a
/// free function of one spelling) would otherwise overwrite each other.
fn reject_duplicate_paths(pages: &mut [(String, Result<Page, PageError>)]) {
    let mut owners: HashMap<String, String> = HashMap::new();
    for (declaration, page) in pages.iter_mut() {
        let path = match page {
            Ok(page) => page.path.clone(),
            Err(_) => continue,
        };
        match owners.get(&path) {
            Some(first) => {
                *page = Err(PageError::DuplicatePage {
                    declaration: declaration.clone(),
                    path,
                    first: first.clone(),
                });
            }
            None => {
                owners.insert(path, declaration.clone());
            }
        }
    }
}

/// Generate documentation pages for `units` into `config.output_dir`.
pub fn generate_docs(units: &[TranslationUnit], config: &DocsConfig) -> Result<Report> {
    let renderer = create_renderer(&config.format)?;
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "failed to create output directory: {}",
            config.output_dir.display()
        )
    })?;

    // Phase one: the index must be complete before any page is composed.
    let filters = unit_filters(units, &config.filter);
    let classes = collect_classes(units, &filters);
    let index = XrefIndex::build(&classes);
    if index.is_empty() {
        log::debug!("no documented classes; synopses carry no links");
    } else {
        log::debug!("indexed {} documented type names", index.len());
    }

    let mut report = Report::default();
    for (declaration, page) in build_pages(units, &config.filter, &index, &config.examples_dir) {
        let result = page.and_then(|page| write_page(&page, renderer.as_ref(), &config.output_dir));
        match result {
            Ok(path) => {
                log::info!("wrote {}", path.display());
                report.written.push(path);
            }
            Err(e) => {
                log::error!("skipping page: {}", e);
                report.failed.push((declaration, e));
            }
        }
    }
    Ok(report)
}

fn write_page(page: &Page, renderer: &dyn Renderer, output_dir: &Path) -> Result<PathBuf, PageError> {
    let path = output_dir.join(format!("{}.{}", page.path, renderer.file_extension()));
    let text = renderer.render(page)?;
    let write = |path: &Path| -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &text)
    };
    write(&path).map_err(|source| PageError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Write the binding scaffold of every class to `config.output`.
pub fn generate_scaffold(units: &[TranslationUnit], config: &ScaffoldConfig) -> Result<()> {
    let filters = unit_filters(units, &config.filter);
    let classes = collect_classes(units, &filters);
    if classes.is_empty() {
        log::warn!("no classes matched; writing an empty scaffold");
    }
    let out = unit_scaffold(classes);
    if let Some(parent) = config.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    fs::write(&config.output, out)
        .with_context(|| format!("failed to write {}", config.output.display()))?;
    log::info!("wrote {}", config.output.display());
    Ok(())
}
