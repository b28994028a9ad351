/// Pure function: TypeReference -> C# type name.
///
/// Well-known framework type names map to their C# keywords; anything
/// else is passed through unchanged. Arrays resolve the element first and
/// then append one bracket pair per level, with `rank - 1` commas inside.
use crate::ast::TypeReference;

/// C# keyword for a well-known framework type name, if there is one.
pub fn keyword_for(base_type: &str) -> Option<&'static str> {
    let kw = match base_type {
        "System.Decimal" => "decimal",
        "System.Double" => "double",
        "System.Single" => "float",
        "System.Byte" => "byte",
        "System.SByte" => "sbyte",
        "System.Int32" => "int",
        "System.UInt32" => "uint",
        "System.Int64" => "long",
        "System.UInt64" => "ulong",
        "System.Int16" => "short",
        "System.UInt16" => "ushort",
        "System.Boolean" => "bool",
        "System.Char" => "char",
        "System.String" => "string",
        "System.Object" => "object",
        "System.Void" => "void",
        _ => return None,
    };
    Some(kw)
}

/// The C# spelling of a type reference.
pub fn type_output(type_ref: &TypeReference) -> String {
    let mut out = match type_ref.array_element_type.as_deref() {
        Some(elem) => type_output(elem),
        None => keyword_for(&type_ref.base_type)
            .map(str::to_string)
            .unwrap_or_else(|| type_ref.base_type.clone()),
    };
    if type_ref.array_rank > 0 {
        out.push('[');
        for _ in 1..type_ref.array_rank {
            out.push(',');
        }
        out.push(']');
    }
    out
}
