use lash_ir::{walk_expr, ExprRef, LashError, Visitor};

use crate::{
    AutoVariable, BooleanOp, ConstantFolder, DefnDeSugar, ExportShorthand, ExpressionExpander,
    LambdaDeSugar, MacroVerifier, NoOpRemover, TryDeSugar,
};

/// An ordered list of passes applied one after another to each form.
pub struct Pipeline {
    passes: Vec<Box<dyn Visitor>>,
}

impl Pipeline {
    pub fn new(passes: Vec<Box<dyn Visitor>>) -> Self {
        Pipeline { passes }
    }

    /// The passes every loaded file and REPL line goes through.
    pub fn standard() -> Self {
        Pipeline::new(vec![
            Box::new(MacroVerifier),
            Box::new(TryDeSugar),
            Box::new(BooleanOp),
            Box::new(LambdaDeSugar),
            Box::new(DefnDeSugar),
            Box::new(ExportShorthand),
            Box::new(AutoVariable),
            Box::new(ConstantFolder),
            Box::new(NoOpRemover),
            Box::new(ExpressionExpander),
        ])
    }

    /// The standard pipeline minus the pass called `name`.
    pub fn standard_without(name: &str) -> Self {
        let mut pipeline = Pipeline::standard();
        pipeline.passes.retain(|pass| pass.name() != name);
        pipeline
    }

    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|pass| pass.name()).collect()
    }

    pub fn transform(&self, expr: &ExprRef) -> Result<ExprRef, LashError> {
        self.passes.iter().try_fold(expr.clone(), |acc, pass| {
            tracing::trace!(pass = pass.name(), "running pass");
            walk_expr(pass.as_ref(), &acc)
        })
    }

    #[tracing::instrument(level = "debug", skip_all, fields(forms = forms.len()))]
    pub fn transform_all(&self, forms: &[ExprRef]) -> Result<Vec<ExprRef>, LashError> {
        forms.iter().map(|form| self.transform(form)).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Pipeline::standard()
    }
}
