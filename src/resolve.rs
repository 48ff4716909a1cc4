use serde::Serialize;
use tracing::debug;

use crate::diagnostics::Error;
use crate::imports::ImportInference;
use crate::parser::{self, ast::TypeExpr};

/// Where a reference like `http.Handler` points: the package's import path,
/// the qualifier used in the reference, and the type name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceRef {
    pub path: String,
    pub qualifier: String,
    pub name: String,
}

/// Resolve `reference` by declaring a variable of that type in a scratch
/// file and letting `inference` add the import it needs.
pub fn find_interface(inference: &dyn ImportInference, reference: &str) -> Result<InterfaceRef, Error> {
    if reference.split_whitespace().count() != 1 {
        return Err(Error::malformed(reference));
    }

    let scratch = format!("package hack\nvar i {reference}\n");
    let processed = inference.process(&scratch).map_err(|e| Error::unresolvable(reference, e))?;
    let file = parser::parse_file(&processed, 0).map_err(|e| Error::unresolvable(reference, e))?;

    let Some(import) = file.imports.first() else {
        return Err(Error::unrecognized(reference));
    };
    let ty = file.var_specs().next().and_then(|spec| spec.node.ty.as_ref());
    let Some(TypeExpr::Selector { package, name }) = ty.map(|t| &t.node) else {
        return Err(Error::unrecognized(reference));
    };

    let found = InterfaceRef {
        path: import.node.path.node.clone(),
        qualifier: package.node.clone(),
        name: name.node.clone(),
    };
    debug!(reference, path = %found.path, name = %found.name, "resolved reference");
    Ok(found)
}
