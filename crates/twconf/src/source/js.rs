//! Winnow parser for declarative JavaScript config modules
//!
//! Handles the subset of JavaScript that config files are written in:
//!
//! ```javascript
//! /** @type {import('tailwindcss').Config} */
//! const forms = require("@tailwindcss/forms");
//!
//! module.exports = {
//!   content: ["./static-files/**/*.{html,js}"],
//!   theme: { extend: {} },
//!   plugins: [require("daisyui"), forms({ strategy: "class" })],
//!   daisyui: { themes: ["light", "dark", "cupcake"] },
//! };
//! ```
//!
//! `require("x")` (or an identifier bound to one) evaluates to the plugin
//! reference `"x"`; calling it with an object literal evaluates to
//! `{ "name": "x", "args": {...} }`. Anything that would need a JavaScript
//! runtime (functions, spreads, member access) is rejected with a span.

use std::ops::Range;

use rustc_hash::FxHashMap;
use serde_json::{Map, Number, Value};
use winnow::{
    Parser, Result as WResult,
    ascii::{digit1, multispace1},
    combinator::{alt, delimited, fail, opt, preceded, repeat, terminated},
    error::{ContextError, StrContext, StrContextValue},
    stream::LocatingSlice,
    token::{any, one_of, take_till, take_until, take_while},
};

use crate::error::{ConfigError, Result};

type Input<'s> = LocatingSlice<&'s str>;

/// Unevaluated expression with enough location info to report errors.
#[derive(Debug, Clone, PartialEq)]
enum Expr {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Expr>),
    Object(Vec<(String, Expr)>),
    Require(String),
    Ident {
        name: String,
        span: Range<usize>,
    },
    Call {
        callee: Box<Expr>,
        arg: Option<Box<Expr>>,
        span: Range<usize>,
    },
}

#[derive(Debug)]
struct Module {
    bindings: Vec<(String, Expr)>,
    export: Expr,
}

#[derive(Debug)]
struct EvalError {
    message: String,
    span: Range<usize>,
}

/// Parse and evaluate a config module into a value tree.
pub fn parse_module(source: &str, name: &str) -> Result<Value> {
    let module = module.parse(LocatingSlice::new(source)).map_err(|e| {
        let offset = e.offset();
        let message = match e.inner().to_string() {
            msg if msg.is_empty() => "unexpected input".to_string(),
            msg => msg,
        };
        let len = usize::from(offset < source.len());
        ConfigError::syntax(name, source, message, (offset, len))
    })?;

    tracing::trace!(
        bindings = module.bindings.len(),
        "Parsed config module {}",
        name
    );

    evaluate(module).map_err(|e| ConfigError::syntax(name, source, e.message, e.span))
}

fn evaluate(module: Module) -> std::result::Result<Value, EvalError> {
    let mut scope = FxHashMap::default();
    for (binding, expr) in module.bindings {
        let value = eval(expr, &scope)?;
        scope.insert(binding, value);
    }
    eval(module.export, &scope)
}

fn eval(expr: Expr, scope: &FxHashMap<String, Value>) -> std::result::Result<Value, EvalError> {
    Ok(match expr {
        Expr::Null => Value::Null,
        Expr::Bool(b) => Value::Bool(b),
        Expr::Number(n) => Value::Number(n),
        Expr::String(s) | Expr::Require(s) => Value::String(s),
        Expr::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| eval(item, scope))
                .collect::<std::result::Result<_, _>>()?,
        ),
        Expr::Object(entries) => {
            let mut map = Map::with_capacity(entries.len());
            for (key, value) in entries {
                map.insert(key, eval(value, scope)?);
            }
            Value::Object(map)
        }
        Expr::Ident { name, span } => scope.get(&name).cloned().ok_or_else(|| EvalError {
            message: format!("`{name}` is not defined; only literals and require() bindings are supported"),
            span,
        })?,
        Expr::Call { callee, arg, span } => {
            if !matches!(*callee, Expr::Require(_) | Expr::Ident { .. }) {
                return Err(EvalError {
                    message: "only plugin references can be called".to_string(),
                    span,
                });
            }
            let Value::String(plugin) = eval(*callee, scope)? else {
                return Err(EvalError {
                    message: "only plugin references can be called".to_string(),
                    span,
                });
            };
            match arg.map(|arg| eval(*arg, scope)).transpose()? {
                None => Value::String(plugin),
                Some(Value::Object(args)) => {
                    let mut reference = Map::with_capacity(2);
                    reference.insert("name".to_string(), Value::String(plugin));
                    reference.insert("args".to_string(), Value::Object(args));
                    Value::Object(reference)
                }
                Some(_) => {
                    return Err(EvalError {
                        message: format!("options for plugin `{plugin}` must be an object literal"),
                        span,
                    });
                }
            }
        }
    })
}

// module := statement* export-head value ('satisfies' ident)? ';'?
fn module(input: &mut Input<'_>) -> WResult<Module> {
    ws.parse_next(input)?;
    let statements: Vec<Option<(String, Expr)>> =
        repeat(0.., terminated(statement, ws)).parse_next(input)?;
    export_head
        .context(StrContext::Expected(StrContextValue::Description(
            "`module.exports =` or `export default`",
        )))
        .parse_next(input)?;
    ws.parse_next(input)?;
    let export = expr
        .context(StrContext::Label("exported config"))
        .parse_next(input)?;
    opt((ws1, "satisfies", ws1, identifier)).parse_next(input)?;
    ws.parse_next(input)?;
    opt(';').parse_next(input)?;
    ws.parse_next(input)?;

    Ok(Module {
        bindings: statements.into_iter().flatten().collect(),
        export,
    })
}

fn export_head(input: &mut Input<'_>) -> WResult<()> {
    alt((
        ("module", ws, '.', ws, "exports", ws, '=').void(),
        ("export", ws1, "default").void(),
    ))
    .parse_next(input)
}

// Top-level statements before the export. Only bindings produce a value.
fn statement(input: &mut Input<'_>) -> WResult<Option<(String, Expr)>> {
    alt((
        (string_literal, ws, opt(';')).value(None),
        import_type.value(None),
        import_default.map(Some),
        binding.map(Some),
    ))
    .parse_next(input)
}

// import type { Config } from "tailwindcss"
fn import_type(input: &mut Input<'_>) -> WResult<()> {
    (
        "import",
        ws1,
        "type",
        ws,
        delimited('{', take_until(0.., '}'), '}'),
        ws,
        "from",
        ws,
        string_literal,
        opt((ws, ';')),
    )
        .void()
        .parse_next(input)
}

// import daisyui from "daisyui"
fn import_default(input: &mut Input<'_>) -> WResult<(String, Expr)> {
    let (_, _, name, _, _, _, module, _) = (
        "import",
        ws1,
        identifier,
        ws1,
        "from",
        ws,
        string_literal,
        opt((ws, ';')),
    )
        .parse_next(input)?;
    Ok((name.to_string(), Expr::Require(module)))
}

// const daisyui = require("daisyui");
// const config: Config = { ... }
fn binding(input: &mut Input<'_>) -> WResult<(String, Expr)> {
    let (_, _, name, _, _, _, _, value, _) = (
        alt(("const", "let", "var")),
        ws1,
        identifier,
        ws,
        opt((':', ws, identifier, ws)),
        '=',
        ws,
        expr,
        opt((ws, ';')),
    )
        .parse_next(input)?;
    Ok((name.to_string(), value))
}

// Primary expression with an optional call suffix: require("x")({...})
fn expr(input: &mut Input<'_>) -> WResult<Expr> {
    let (callee, callee_span) = primary.with_span().parse_next(input)?;
    let call = opt(preceded(ws, call_args).with_span()).parse_next(input)?;

    Ok(match call {
        Some((arg, call_span)) => Expr::Call {
            callee: Box::new(callee),
            arg: arg.map(Box::new),
            span: callee_span.start..call_span.end,
        },
        None => callee,
    })
}

fn call_args(input: &mut Input<'_>) -> WResult<Option<Expr>> {
    delimited(('(', ws), opt(terminated(expr, ws)), ')').parse_next(input)
}

fn primary(input: &mut Input<'_>) -> WResult<Expr> {
    alt((
        object.map(Expr::Object),
        array.map(Expr::Array),
        string_literal.map(Expr::String),
        number.map(Expr::Number),
        require_call.map(Expr::Require),
        identifier.with_span().map(|(name, span)| match name {
            "null" | "undefined" => Expr::Null,
            "true" => Expr::Bool(true),
            "false" => Expr::Bool(false),
            _ => Expr::Ident {
                name: name.to_string(),
                span,
            },
        }),
        fail.context(StrContext::Expected(StrContextValue::Description(
            "a literal, require() call or identifier",
        ))),
    ))
    .parse_next(input)
}

fn require_call(input: &mut Input<'_>) -> WResult<String> {
    preceded(
        ("require", ws, '(', ws),
        terminated(string_literal, (ws, ')')),
    )
    .parse_next(input)
}

// { key: value, "quoted-key": value, 128: value, }
fn object(input: &mut Input<'_>) -> WResult<Vec<(String, Expr)>> {
    '{'.parse_next(input)?;
    let mut entries = Vec::new();
    loop {
        ws.parse_next(input)?;
        if opt('}').parse_next(input)?.is_some() {
            return Ok(entries);
        }
        let key = property_key
            .context(StrContext::Label("property key"))
            .parse_next(input)?;
        (ws, ':', ws).parse_next(input)?;
        let value = expr.context(StrContext::Label("property value")).parse_next(input)?;
        entries.push((key, value));
        ws.parse_next(input)?;
        if opt(',').parse_next(input)?.is_none() {
            '}'.context(StrContext::Expected(StrContextValue::CharLiteral('}')))
                .parse_next(input)?;
            return Ok(entries);
        }
    }
}

// [value, value, ]
fn array(input: &mut Input<'_>) -> WResult<Vec<Expr>> {
    '['.parse_next(input)?;
    let mut items = Vec::new();
    loop {
        ws.parse_next(input)?;
        if opt(']').parse_next(input)?.is_some() {
            return Ok(items);
        }
        items.push(expr.context(StrContext::Label("array element")).parse_next(input)?);
        ws.parse_next(input)?;
        if opt(',').parse_next(input)?.is_none() {
            ']'.context(StrContext::Expected(StrContextValue::CharLiteral(']')))
                .parse_next(input)?;
            return Ok(items);
        }
    }
}

fn property_key(input: &mut Input<'_>) -> WResult<String> {
    alt((
        string_literal,
        identifier.map(str::to_string),
        digit1.map(str::to_string),
    ))
    .parse_next(input)
}

// Identifier: letters, digits, `_` and `$`, not starting with a digit
fn identifier<'s>(input: &mut Input<'s>) -> WResult<&'s str> {
    (
        one_of(|c: char| c.is_alphabetic() || c == '_' || c == '$'),
        take_while(0.., |c: char| c.is_alphanumeric() || c == '_' || c == '$'),
    )
        .take()
        .parse_next(input)
}

fn number(input: &mut Input<'_>) -> WResult<Number> {
    (
        opt('-'),
        digit1,
        opt(('.', digit1)),
        opt((one_of(['e', 'E']), opt(one_of(['+', '-'])), digit1)),
    )
        .take()
        .verify_map(number_from_str)
        .parse_next(input)
}

fn number_from_str(text: &str) -> Option<Number> {
    match text.parse::<i64>() {
        Ok(int) => Some(Number::from(int)),
        Err(_) => text.parse::<f64>().ok().and_then(Number::from_f64),
    }
}

fn string_literal(input: &mut Input<'_>) -> WResult<String> {
    alt((quoted('"'), quoted('\''), quoted('`'))).parse_next(input)
}

fn quoted<'s>(mut quote: char) -> impl Parser<Input<'s>, String, ContextError> {
    move |input: &mut Input<'s>| {
        quote.parse_next(input)?;
        let mut out = String::new();
        loop {
            match any.parse_next(input)? {
                c if c == quote => return Ok(out),
                '\\' => match any.parse_next(input)? {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    'r' => out.push('\r'),
                    '0' => out.push('\0'),
                    '\n' => {}
                    other => out.push(other),
                },
                '\n' if quote != '`' => {
                    return fail
                        .context(StrContext::Label("unterminated string"))
                        .parse_next(input);
                }
                '$' if quote == '`' => {
                    if opt('{').parse_next(input)?.is_some() {
                        return fail
                            .context(StrContext::Label("template interpolation"))
                            .parse_next(input);
                    }
                    out.push('$');
                }
                c => out.push(c),
            }
        }
    }
}

// Whitespace and comments
fn ws(input: &mut Input<'_>) -> WResult<()> {
    repeat(
        0..,
        alt((
            multispace1.void(),
            ("//", take_till(0.., '\n')).void(),
            ("/*", take_until(0.., "*/"), "*/").void(),
        )),
    )
    .parse_next(input)
}

fn ws1(input: &mut Input<'_>) -> WResult<()> {
    (multispace1, ws).void().parse_next(input)
}
