//! Recursive-descent parser from the CTL concrete syntax to a [Phi] tree.
//!
//! Grammar (see `SPEC_FULL.md` §6.4 for the full account):
//!
//! ```text
//! Phi   ::= 'true' | 'false'
//!         | '"' APchar+ '"'
//!         | '-' Phi
//!         | '(' Phi BinOp Phi ')'
//!         | '(' Phi ')'
//!         | UModal Phi
//!         | QUANT '(' Phi BModal Phi ')'
//! ```
//!
//! There is no operator precedence: every binary combinator must be parenthesized, so the
//! parser never needs more than one token of lookahead to decide which production applies.

use crate::error::ParseError;
use crate::formula::lexer::{tokenize, BinModal, PropOp, Quant, Token, UnaryModal};
use crate::formula::node::{Ap, Phi};

/// Parse `input` as a complete CTL formula. The entire (whitespace-stripped) token stream must
/// be consumed; trailing tokens are a parse error.
pub fn parse_ctl(input: &str) -> Result<Phi, ParseError> {
    let tokens = tokenize(input)?;
    let mut pos = 0;
    let phi = parse_phi(&tokens, &mut pos)?;
    if pos != tokens.len() {
        return Err(ParseError::new(pos, "trailing input after formula"));
    }
    Ok(phi)
}

fn parse_phi(tokens: &[Token], pos: &mut usize) -> Result<Phi, ParseError> {
    let tok = tokens
        .get(*pos)
        .ok_or_else(|| ParseError::new(*pos, "unexpected end of input"))?;

    match tok {
        Token::True => {
            *pos += 1;
            Ok(Phi::mk_true())
        }
        Token::False => {
            *pos += 1;
            Ok(Phi::mk_false())
        }
        Token::Ap(name) => {
            *pos += 1;
            Ok(Phi::mk_atom(Ap::new(name.clone())))
        }
        Token::Not => {
            *pos += 1;
            let inner = parse_phi(tokens, pos)?;
            Ok(Phi::mk_not(inner))
        }
        Token::Unary(op) => {
            *pos += 1;
            let inner = parse_phi(tokens, pos)?;
            Ok(match op {
                UnaryModal::Ex => Phi::mk_ex(inner),
                UnaryModal::Ef => Phi::mk_ef(inner),
                UnaryModal::Eg => Phi::mk_eg(inner),
                UnaryModal::Ax => Phi::mk_ax(inner),
                UnaryModal::Af => Phi::mk_af(inner),
                UnaryModal::Ag => Phi::mk_ag(inner),
            })
        }
        Token::Quant(quant) => {
            let quant = *quant;
            *pos += 1;
            expect(tokens, pos, Token::LParen)?;
            let lhs = parse_phi(tokens, pos)?;
            let modal = expect_modal(tokens, pos)?;
            let rhs = parse_phi(tokens, pos)?;
            expect(tokens, pos, Token::RParen)?;
            Ok(apply_quantified_modal(quant, modal, lhs, rhs))
        }
        Token::LParen => {
            *pos += 1;
            let lhs = parse_phi(tokens, pos)?;
            match tokens.get(*pos) {
                Some(Token::RParen) => {
                    *pos += 1;
                    Ok(lhs)
                }
                Some(Token::Prop(op)) => {
                    let op = *op;
                    *pos += 1;
                    let rhs = parse_phi(tokens, pos)?;
                    expect(tokens, pos, Token::RParen)?;
                    Ok(match op {
                        PropOp::And => Phi::mk_and(lhs, rhs),
                        PropOp::Or => Phi::mk_or(lhs, rhs),
                    })
                }
                _ => Err(ParseError::new(*pos, "expected ')' or a binary connective")),
            }
        }
        Token::RParen | Token::Prop(_) | Token::Modal(_) => Err(ParseError::new(
            *pos,
            "unexpected token at the start of a formula",
        )),
    }
}

fn apply_quantified_modal(quant: Quant, modal: BinModal, lhs: Phi, rhs: Phi) -> Phi {
    use BinModal::*;
    use Quant::*;
    match (quant, modal) {
        (Exists, Until) => Phi::mk_eu(lhs, rhs),
        (Exists, WeakUntil) => Phi::mk_ew(lhs, rhs),
        (Exists, Release) => Phi::mk_er(lhs, rhs),
        (Exists, Since) => Phi::mk_es(lhs, rhs),
        (ForAll, Until) => Phi::mk_au(lhs, rhs),
        (ForAll, WeakUntil) => Phi::mk_aw(lhs, rhs),
        (ForAll, Release) => Phi::mk_ar(lhs, rhs),
        (ForAll, Since) => Phi::mk_as(lhs, rhs),
    }
}

fn expect(tokens: &[Token], pos: &mut usize, expected: Token) -> Result<(), ParseError> {
    match tokens.get(*pos) {
        Some(tok) if *tok == expected => {
            *pos += 1;
            Ok(())
        }
        _ => Err(ParseError::new(*pos, format!("expected {expected:?}"))),
    }
}

fn expect_modal(tokens: &[Token], pos: &mut usize) -> Result<BinModal, ParseError> {
    match tokens.get(*pos) {
        Some(Token::Modal(modal)) => {
            let modal = *modal;
            *pos += 1;
            Ok(modal)
        }
        _ => Err(ParseError::new(
            *pos,
            "expected one of 'U','W','R','S'",
        )),
    }
}
