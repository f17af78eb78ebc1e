use tgp_core::types::Type;
use tgp_error::Error;
use super::error::UnknownType;

/// Reads a type annotation, such as `integer`, `list<boolean>` or
/// `function<boolean, integer>`.
pub fn read_type(source: &str) -> Result<Type, Error> {
    parse_type(source.trim())
        .ok_or_else(|| Error::new(vec![0..source.len()], UnknownType { name: source.to_string() }))
}

fn parse_type(source: &str) -> Option<Type> {
    match source {
        "integer" => return Some(Type::Integer),
        "boolean" => return Some(Type::Boolean),
        "string" => return Some(Type::String),
        _ => (),
    }

    let (name, params) = source.strip_suffix('>')?.split_once('<')?;
    let params = split_params(params)?;
    match (name.trim(), params.as_slice()) {
        ("list", [inner]) => Some(Type::list(parse_type(inner)?)),
        ("optional", [inner]) => Some(Type::optional(parse_type(inner)?)),
        ("function", [ret, args @ ..]) => Some(Type::function(
            parse_type(ret)?,
            args.iter().map(|arg| parse_type(arg)).collect::<Option<Vec<_>>>()?,
        )),
        _ => None,
    }
}

/// Splits type parameters on the commas that are not nested in angle brackets.
fn split_params(source: &str) -> Option<Vec<&str>> {
    let mut depth = 0usize;
    let mut start = 0;
    let mut params = Vec::new();

    for (i, c) in source.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                params.push(source[start..i].trim());
                start = i + 1;
            },
            _ => (),
        }
    }

    params.push(source[start..].trim());
    Some(params)
}
