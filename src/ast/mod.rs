/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: File root and declarations
/// - expressions: Expression nodes and operator tags
/// - statements: Statements that appear inside blocks
///
/// Every node owns its children; there is no sharing between subtrees.
pub mod ast;
pub mod expressions;
pub mod statements;
