//! Entity grammar: packages, classes, singletons, mixins, programs,
//! describes, tests, imports and top-level variables.
//!
//! The five recoverable containers live here. Each child is attempted from
//! a checkpoint; on failure the cursor is rewound and the skipper consumes
//! up to the next safeword, producing a problem that covers exactly the
//! malformed region. Well-formed siblings always survive.

use smol_str::SmolStr;

use super::{
    CLASS_MEMBER_SAFEWORDS, ENTITY_SAFEWORDS, MEMBER_SAFEWORDS, common, members, sentences,
};
use crate::ast::{
    Class, Describe, Entity, Import, Member, Mixin, Package, Problem, ProblemCode, Program,
    Reference, Singleton, Test,
};
use crate::parser::errors::ParseError;
use crate::parser::parser::Parser;
use crate::parser::token_kind::TokenKind;

/// Which member alternation and safeword set a container body uses.
#[derive(Clone, Copy)]
enum MemberContext {
    Class,
    Object,
    Describe,
}

/// The whole file as a package named after it.
pub(crate) fn file_package(p: &mut Parser, file_name: &str) -> Package {
    let (imports, members, problems) = package_items(p, false);
    Package {
        name: package_name_of(file_name),
        imports,
        members,
        problems,
        source: p.full_span(),
    }
}

/// Basename of the file up to its first `.`.
fn package_name_of(file_name: &str) -> SmolStr {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);
    SmolStr::new(base.split('.').next().unwrap_or(base))
}

fn entity(p: &mut Parser) -> Result<Entity, ParseError> {
    match p.current_kind() {
        TokenKind::PackageKw => Ok(Entity::Package(package(p)?)),
        TokenKind::ClassKw => Ok(Entity::Class(class(p)?)),
        TokenKind::ObjectKw => Ok(Entity::Singleton(singleton(p, true)?)),
        TokenKind::MixinKw => Ok(Entity::Mixin(mixin(p)?)),
        TokenKind::ProgramKw => Ok(Entity::Program(program(p)?)),
        TokenKind::DescribeKw => Ok(Entity::Describe(describe(p)?)),
        TokenKind::TestKw | TokenKind::OnlyKw => Ok(Entity::Test(test(p)?)),
        TokenKind::VarKw | TokenKind::ConstKw => Ok(Entity::Variable(sentences::variable(p)?)),
        _ => Err(p.error(format!(
            "expected an entity, found {}",
            p.current_kind().display_name()
        ))),
    }
}

/// The recoverable import-then-entity sequence shared by the file and
/// nested packages. With `until_brace`, the loop stops at the enclosing
/// `}`; otherwise it runs to the end of input.
fn package_items(
    p: &mut Parser,
    until_brace: bool,
) -> (Vec<Import>, Vec<Entity>, Vec<Problem>) {
    let mut imports = vec![];
    let mut members = vec![];
    let mut problems = vec![];

    while p.at(TokenKind::ImportKw) {
        let checkpoint = p.checkpoint();
        match import(p) {
            Ok(node) => imports.push(node),
            Err(_) => {
                p.restore(checkpoint);
                match p.recover_until(ENTITY_SAFEWORDS) {
                    Some(source) => {
                        problems.push(Problem::new(ProblemCode::MalformedEntity, source));
                    }
                    None => return (imports, members, problems),
                }
            }
        }
    }

    loop {
        if p.at_eof() || (until_brace && p.at(TokenKind::RBrace)) {
            break;
        }
        let checkpoint = p.checkpoint();
        match entity(p) {
            Ok(node) => members.push(node),
            Err(_) => {
                p.restore(checkpoint);
                match p.recover_until(ENTITY_SAFEWORDS) {
                    Some(source) => {
                        problems.push(Problem::new(ProblemCode::MalformedEntity, source));
                    }
                    None => break,
                }
            }
        }
    }

    (imports, members, problems)
}

/// `import a.b.C` or `import a.b.*`
fn import(p: &mut Parser) -> Result<Import, ParseError> {
    let start = p.offset();
    p.expect(TokenKind::ImportKw)?;
    let entity = common::qualified_reference(p)?;
    let is_generic = if p.at(TokenKind::Dot) && p.nth(1) == TokenKind::Star {
        p.bump();
        p.bump();
        true
    } else {
        false
    };
    Ok(Import {
        entity,
        is_generic,
        source: p.span_from(start),
    })
}

/// `package N { imports entities }`
fn package(p: &mut Parser) -> Result<Package, ParseError> {
    let start = p.offset();
    p.expect(TokenKind::PackageKw)?;
    let (name, _) = common::name(p)?;
    p.expect(TokenKind::LBrace)?;
    let (imports, members, problems) = package_items(p, true);
    p.expect(TokenKind::RBrace)?;
    Ok(Package {
        name,
        imports,
        members,
        problems,
        source: p.span_from(start),
    })
}

/// `class N [inherits S] [mixed with …] { members }`
fn class(p: &mut Parser) -> Result<Class, ParseError> {
    let start = p.offset();
    p.expect(TokenKind::ClassKw)?;
    let (name, _) = common::name(p)?;
    let superclass = if p.eat(TokenKind::InheritsKw) {
        Some(common::qualified_reference(p)?)
    } else {
        None
    };
    let mixins = mixin_list(p)?;
    let (members, problems) = members_block(p, MemberContext::Class)?;
    Ok(Class {
        name,
        superclass,
        mixins,
        members,
        problems,
        source: p.span_from(start),
    })
}

/// `object [N] [inherits S(args)] [mixed with …] { members }`
pub(crate) fn singleton(p: &mut Parser, named: bool) -> Result<Singleton, ParseError> {
    let start = p.offset();
    p.expect(TokenKind::ObjectKw)?;
    // `object mixed with M { }` is an anonymous singleton, not one named
    // "mixed"
    let at_mixin_clause = p.at(TokenKind::MixedKw) && p.nth(1) == TokenKind::WithKw;
    let name = if named && common::at_name(p) && !at_mixin_clause {
        Some(common::name(p)?.0)
    } else {
        None
    };
    let (superclass, supercall_args) = if p.eat(TokenKind::InheritsKw) {
        let superclass = common::qualified_reference(p)?;
        let args = if p.at(TokenKind::LParen) {
            common::arguments(p)?
        } else {
            vec![]
        };
        (Some(superclass), args)
    } else {
        (None, vec![])
    };
    let mixins = mixin_list(p)?;
    let (members, problems) = members_block(p, MemberContext::Object)?;
    Ok(Singleton {
        name,
        superclass,
        supercall_args,
        mixins,
        members,
        problems,
        source: p.span_from(start),
    })
}

/// The `object { … }` literal form: structurally a singleton, never named.
pub(crate) fn anonymous_singleton(p: &mut Parser) -> Result<Singleton, ParseError> {
    singleton(p, false)
}

/// `mixin N [mixed with …] { members }`
fn mixin(p: &mut Parser) -> Result<Mixin, ParseError> {
    let start = p.offset();
    p.expect(TokenKind::MixinKw)?;
    let (name, _) = common::name(p)?;
    let mixins = mixin_list(p)?;
    let (members, problems) = members_block(p, MemberContext::Object)?;
    Ok(Mixin {
        name,
        mixins,
        members,
        problems,
        source: p.span_from(start),
    })
}

/// `program N { sentences }`
fn program(p: &mut Parser) -> Result<Program, ParseError> {
    let start = p.offset();
    p.expect(TokenKind::ProgramKw)?;
    let (name, _) = common::name(p)?;
    let body = sentences::block_body(p)?;
    Ok(Program {
        name,
        body,
        source: p.span_from(start),
    })
}

/// `describe "…" { members }`; the quoted name is kept verbatim.
fn describe(p: &mut Parser) -> Result<Describe, ParseError> {
    let start = p.offset();
    p.expect(TokenKind::DescribeKw)?;
    let name = quoted_name(p)?;
    let (members, problems) = members_block(p, MemberContext::Describe)?;
    Ok(Describe {
        name,
        members,
        problems,
        source: p.span_from(start),
    })
}

/// `[only] test "…" { sentences }`; the quoted name is kept verbatim.
pub(crate) fn test(p: &mut Parser) -> Result<Test, ParseError> {
    let start = p.offset();
    let is_only = p.eat(TokenKind::OnlyKw);
    p.expect(TokenKind::TestKw)?;
    let name = quoted_name(p)?;
    let body = sentences::block_body(p)?;
    Ok(Test {
        is_only,
        name,
        body,
        source: p.span_from(start),
    })
}

fn quoted_name(p: &mut Parser) -> Result<SmolStr, ParseError> {
    let token = p.expect(TokenKind::Str)?;
    Ok(SmolStr::new(token.text))
}

/// `mixed with R (and R)*`, stored in reverse surface order. `mixed with`
/// is a single two-word key; a lone `mixed` is left for the caller.
fn mixin_list(p: &mut Parser) -> Result<Vec<Reference>, ParseError> {
    if !(p.at(TokenKind::MixedKw) && p.nth(1) == TokenKind::WithKw) {
        return Ok(vec![]);
    }
    p.bump();
    p.bump();
    let mut mixins = vec![common::qualified_reference(p)?];
    while p.eat(TokenKind::AndKw) {
        mixins.push(common::qualified_reference(p)?);
    }
    mixins.reverse();
    Ok(mixins)
}

/// A braced, recoverable member list. Between the braces everything is
/// either a member or a problem; only the braces themselves can fail the
/// container, which then surfaces through the caller's own recovery.
fn members_block(
    p: &mut Parser,
    context: MemberContext,
) -> Result<(Vec<Member>, Vec<Problem>), ParseError> {
    let mut members = vec![];
    let mut problems = vec![];
    p.expect(TokenKind::LBrace)?;
    while !p.at(TokenKind::RBrace) && !p.at_eof() {
        let checkpoint = p.checkpoint();
        let parsed = match context {
            MemberContext::Class => members::class_member(p),
            MemberContext::Object => members::object_member(p),
            MemberContext::Describe => members::describe_member(p),
        };
        match parsed {
            Ok(member) => members.push(member),
            Err(_) => {
                p.restore(checkpoint);
                let safewords = match context {
                    MemberContext::Class => CLASS_MEMBER_SAFEWORDS,
                    MemberContext::Object | MemberContext::Describe => MEMBER_SAFEWORDS,
                };
                match p.recover_until(safewords) {
                    Some(source) => {
                        problems.push(Problem::new(ProblemCode::MalformedMember, source));
                    }
                    None => break,
                }
            }
        }
    }
    p.expect(TokenKind::RBrace)?;
    Ok((members, problems))
}
