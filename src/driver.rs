// SPDX-License-Identifier: Unlicense
use crate::ast::{Id, Store};
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::{cse, draw, dump, fold, parser, rewrite};
use log::debug;

/// A compiled expression: the store it lives in and the root of the final tree.
#[derive(Debug)]
pub struct Compilation {
    store: Store,
    root: Id,
    format: OutputFormat,
}

impl Compilation {
    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn root(&self) -> Id {
        self.root
    }

    pub fn dump(&self) -> String {
        dump::dump(&self.store, self.root)
    }

    pub fn draw(&self) -> String {
        draw::draw(&self.store, self.root)
    }

    /// Renders the final tree in the configured output format.
    pub fn render(&self) -> String {
        match self.format {
            OutputFormat::Dump => self.dump(),
            OutputFormat::Draw => self.draw(),
        }
    }
}

fn log_stage(stage: &str, store: &Store, root: Id) {
    debug!(
        "{stage}: {} nodes in tree, {}/{} allocated",
        store.size(Some(root)),
        store.len(),
        store.capacity()
    );
}

/// Parses `source` and runs the enabled passes in order: fold, rewrite, cse.
pub fn compile(source: &str, config: &Config) -> Result<Compilation> {
    let mut store = Store::with_capacity(config.capacity);
    let mut root = parser::parse(&mut store, source)?;
    log_stage("parse", &store, root);

    if config.fold {
        root = fold::fold(&mut store, root)?;
        log_stage("fold", &store, root);
    }
    if config.rewrite {
        root = rewrite::rewrite(&mut store, root)?;
        log_stage("rewrite", &store, root);
    }
    if config.cse {
        root = cse::eliminate(&mut store, root)?;
        log_stage("cse", &store, root);
    }

    Ok(Compilation {
        store,
        root,
        format: config.format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use anyhow::Result;

    fn compile_dump(source: &str) -> Result<String> {
        Ok(compile(source, &Config::default())?.dump())
    }

    #[test_log::test]
    fn compiler_should_hoist_repeated_sum() -> Result<()> {
        let expected = ",\n  =\n    v(@)\n    +\n      v(a)\n      v(b)\n  *\n    v(@)\n    v(@)\n";
        assert_eq!(compile_dump("(a+b)*(a+b)")?, expected);
        assert_eq!(compile_dump("(a+b)*(a+b)*1 + 0")?, expected);
        Ok(())
    }

    #[test_log::test]
    fn compiler_should_leave_unique_tree_unwrapped() -> Result<()> {
        assert_eq!(
            compile_dump("a+b*c")?,
            "+\n  *\n    v(b)\n    v(c)\n  v(a)\n"
        );
        Ok(())
    }

    #[test_log::test]
    fn compiler_should_hoist_strength_reduced_products() -> Result<()> {
        assert_eq!(
            compile_dump("x*2 + x*2")?,
            ",\n  =\n    v(@)\n    +\n      v(x)\n      v(x)\n  +\n    v(@)\n    v(@)\n"
        );
        Ok(())
    }

    #[test_log::test]
    fn compiler_should_fold_to_a_constant() -> Result<()> {
        assert_eq!(compile_dump("(2+3)*(4-1) - 5/0*0")?, "c(15)\n");
        Ok(())
    }

    #[test]
    fn compiler_should_skip_disabled_passes() -> Result<()> {
        let config = Config {
            cse: false,
            ..Config::default()
        };
        let compilation = compile("(a+b)*(a+b)", &config)?;
        assert_eq!(
            compilation.dump(),
            "*\n  +\n    v(a)\n    v(b)\n  +\n    v(a)\n    v(b)\n"
        );

        let config = Config {
            fold: false,
            rewrite: false,
            cse: false,
            ..Config::default()
        };
        let compilation = compile("x*1", &config)?;
        assert_eq!(compilation.dump(), "*\n  v(x)\n  c(1)\n");
        Ok(())
    }

    #[test]
    fn compilation_should_render_configured_format() -> Result<()> {
        let compilation = compile("a*b", &Config::default())?;
        assert_eq!(compilation.render(), compilation.dump());

        let config = Config {
            format: OutputFormat::Draw,
            ..Config::default()
        };
        let compilation = compile("a*b", &config)?;
        assert_eq!(compilation.render(), compilation.draw());
        assert!(compilation.render().starts_with(".ft C\n"));
        Ok(())
    }

    #[test]
    fn compiler_should_report_capacity_in_any_stage() {
        for capacity in [3, 7] {
            let err = compile("(a+b)*(a+b)", &Config::with_capacity(capacity)).unwrap_err();
            assert!(matches!(err, Error::CapacityExceeded { .. }), "{capacity}");
        }
    }

    #[test]
    fn compiler_should_report_malformed_input() {
        let err = compile("a+", &Config::default()).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    #[test]
    fn compilation_should_draw_final_tree() -> Result<()> {
        let compilation = compile("a", &Config::default())?;
        assert_eq!(
            compilation.draw(),
            ".ft C\n.ps 12\n.PS\nN0: box width 0.3i height 0.3i \"a\"\n.PE\n"
        );
        assert_eq!(compilation.store().len(), 1);
        assert_eq!(compilation.root().index(), 0);
        Ok(())
    }
}
