/// Program tree consumed by the C# emitter.
/// These are plain owned values built by the caller (or loaded from JSON)
/// and only read during emission.
use serde::{Deserialize, Serialize};

// ── Types ──────────────────────────────────────────────────────────────

/// A reference to a type: a base type name plus optional array shape.
///
/// `array_rank == 0` is a plain type. For arrays, `array_element_type`
/// holds the element (itself possibly an array, for jagged arrays) and
/// `array_rank` the number of dimensions of this level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeReference {
    pub base_type: String,
    #[serde(default)]
    pub array_rank: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array_element_type: Option<Box<TypeReference>>,
}

impl TypeReference {
    pub fn new(base_type: impl Into<String>) -> Self {
        Self {
            base_type: base_type.into(),
            array_rank: 0,
            array_element_type: None,
        }
    }

    /// An array of `element` with `rank` dimensions.
    pub fn array(element: TypeReference, rank: u32) -> Self {
        Self {
            base_type: element.base_type.clone(),
            array_rank: rank,
            array_element_type: Some(Box::new(element)),
        }
    }

    pub fn void() -> Self {
        Self::new("System.Void")
    }

    /// Follow `array_element_type` down to the first non-array level.
    pub fn innermost_element(&self) -> &TypeReference {
        let mut current = self;
        while let Some(elem) = current.array_element_type.as_deref() {
            current = elem;
        }
        current
    }
}

fn void_type() -> TypeReference {
    TypeReference::void()
}

fn exception_type() -> TypeReference {
    TypeReference::new("System.Exception")
}

// ── Expressions ────────────────────────────────────────────────────────

/// A primitive constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    Long(i64),
    Float(f32),
    Double(f64),
    /// Decimal digits as written, e.g. `"12.50"`.
    Decimal(String),
    Char(char),
    String(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,
    Assign,
    IdentityInequality,
    IdentityEquality,
    ValueEquality,
    BitwiseOr,
    BitwiseAnd,
    BooleanOr,
    BooleanAnd,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

impl BinaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulus => "%",
            BinaryOperator::Assign => "=",
            BinaryOperator::IdentityInequality => "!=",
            BinaryOperator::IdentityEquality => "==",
            BinaryOperator::ValueEquality => "==",
            BinaryOperator::BitwiseOr => "|",
            BinaryOperator::BitwiseAnd => "&",
            BinaryOperator::BooleanOr => "||",
            BinaryOperator::BooleanAnd => "&&",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanOrEqual => ">=",
        }
    }
}

/// Parameter passing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldDirection {
    #[default]
    In,
    Out,
    Ref,
}

/// `target.Method`; the target is omitted for unqualified calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Box<Expression>>,
    pub method_name: String,
}

/// `target.Event`; the target is omitted for unqualified references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Box<Expression>>,
    pub event_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDeclaration {
    pub param_type: TypeReference,
    pub name: String,
    #[serde(default)]
    pub direction: FieldDirection,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_attributes: Vec<AttributeDeclaration>,
}

impl ParameterDeclaration {
    pub fn new(param_type: TypeReference, name: impl Into<String>) -> Self {
        Self {
            param_type,
            name: name.into(),
            direction: FieldDirection::In,
            custom_attributes: Vec::new(),
        }
    }
}

/// One expression node. The set is closed: every variant has exactly one
/// emission rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expression {
    ArgumentReference {
        name: String,
    },
    /// `new T[] { ... }` when `initializers` is non-empty, otherwise
    /// `new Elem[size]` with `size_expression` taking precedence over `size`.
    ArrayCreate {
        create_type: TypeReference,
        #[serde(default)]
        initializers: Vec<Expression>,
        #[serde(default)]
        size: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size_expression: Option<Box<Expression>>,
    },
    ArrayIndexer {
        target: Box<Expression>,
        indices: Vec<Expression>,
    },
    BaseReference,
    BinaryOperator {
        left: Box<Expression>,
        op: BinaryOperator,
        right: Box<Expression>,
    },
    Cast {
        target_type: TypeReference,
        expression: Box<Expression>,
    },
    DelegateCreate {
        delegate_type: TypeReference,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<Box<Expression>>,
        method_name: String,
    },
    DelegateInvoke {
        target: Box<Expression>,
        #[serde(default)]
        arguments: Vec<Expression>,
    },
    Direction {
        direction: FieldDirection,
        expression: Box<Expression>,
    },
    EventReference(EventReference),
    FieldReference {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<Box<Expression>>,
        name: String,
    },
    Indexer {
        target: Box<Expression>,
        indices: Vec<Expression>,
    },
    MethodInvoke {
        method: MethodReference,
        #[serde(default)]
        arguments: Vec<Expression>,
    },
    MethodReference(MethodReference),
    ObjectCreate {
        create_type: TypeReference,
        #[serde(default)]
        arguments: Vec<Expression>,
    },
    ParameterDeclaration(ParameterDeclaration),
    Primitive {
        value: Literal,
    },
    PropertyReference {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<Box<Expression>>,
        name: String,
    },
    PropertySetValue,
    Snippet {
        text: String,
    },
    ThisReference,
    TypeOf {
        type_ref: TypeReference,
    },
    TypeReference {
        type_ref: TypeReference,
    },
    VariableReference {
        name: String,
    },
}

impl Expression {
    pub fn var(name: impl Into<String>) -> Self {
        Expression::VariableReference { name: name.into() }
    }

    pub fn arg(name: impl Into<String>) -> Self {
        Expression::ArgumentReference { name: name.into() }
    }

    pub fn snippet(text: impl Into<String>) -> Self {
        Expression::Snippet { text: text.into() }
    }

    pub fn literal(value: Literal) -> Self {
        Expression::Primitive { value }
    }

    pub fn int(n: i64) -> Self {
        Expression::literal(Literal::Int(n))
    }

    pub fn string(s: impl Into<String>) -> Self {
        Expression::literal(Literal::String(s.into()))
    }

    pub fn field(target: Option<Expression>, name: impl Into<String>) -> Self {
        Expression::FieldReference {
            target: target.map(Box::new),
            name: name.into(),
        }
    }

    pub fn invoke(
        target: Option<Expression>,
        method_name: impl Into<String>,
        arguments: Vec<Expression>,
    ) -> Self {
        Expression::MethodInvoke {
            method: MethodReference {
                target: target.map(Box::new),
                method_name: method_name.into(),
            },
            arguments,
        }
    }

    pub fn binary(left: Expression, op: BinaryOperator, right: Expression) -> Self {
        Expression::BinaryOperator {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Stable lowercase name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Expression::ArgumentReference { .. } => "argument_reference",
            Expression::ArrayCreate { .. } => "array_create",
            Expression::ArrayIndexer { .. } => "array_indexer",
            Expression::BaseReference => "base_reference",
            Expression::BinaryOperator { .. } => "binary_operator",
            Expression::Cast { .. } => "cast",
            Expression::DelegateCreate { .. } => "delegate_create",
            Expression::DelegateInvoke { .. } => "delegate_invoke",
            Expression::Direction { .. } => "direction",
            Expression::EventReference(_) => "event_reference",
            Expression::FieldReference { .. } => "field_reference",
            Expression::Indexer { .. } => "indexer",
            Expression::MethodInvoke { .. } => "method_invoke",
            Expression::MethodReference(_) => "method_reference",
            Expression::ObjectCreate { .. } => "object_create",
            Expression::ParameterDeclaration(_) => "parameter_declaration",
            Expression::Primitive { .. } => "primitive",
            Expression::PropertyReference { .. } => "property_reference",
            Expression::PropertySetValue => "property_set_value",
            Expression::Snippet { .. } => "snippet",
            Expression::ThisReference => "this_reference",
            Expression::TypeOf { .. } => "type_of",
            Expression::TypeReference { .. } => "type_reference",
            Expression::VariableReference { .. } => "variable_reference",
        }
    }
}

// ── Statements ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    #[serde(default)]
    pub doc: bool,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            doc: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchClause {
    #[serde(default = "exception_type")]
    pub exception_type: TypeReference,
    #[serde(default)]
    pub local_name: String,
    #[serde(default)]
    pub statements: Vec<Statement>,
}

/// Source location attached to a range of generated statements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinePragma {
    pub file_name: String,
    pub line_number: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    Assign {
        left: Expression,
        right: Expression,
    },
    AttachEvent {
        event: EventReference,
        listener: Expression,
    },
    Comment(Comment),
    Condition {
        condition: Expression,
        #[serde(default)]
        true_statements: Vec<Statement>,
        #[serde(default)]
        false_statements: Vec<Statement>,
    },
    Expression {
        expression: Expression,
    },
    Goto {
        label: String,
    },
    /// C-style counted loop. All three header parts are optional.
    Iteration {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        init: Option<Box<Statement>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        test: Option<Expression>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        increment: Option<Box<Statement>>,
        #[serde(default)]
        statements: Vec<Statement>,
    },
    Labeled {
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        statement: Option<Box<Statement>>,
    },
    /// Statements bracketed by `#line` markers.
    LinePragma {
        pragma: LinePragma,
        #[serde(default)]
        statements: Vec<Statement>,
    },
    MethodReturn {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expression: Option<Expression>,
    },
    RemoveEvent {
        event: EventReference,
        listener: Expression,
    },
    Snippet {
        text: String,
    },
    ThrowException {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        to_throw: Option<Expression>,
    },
    TryCatchFinally {
        #[serde(default)]
        try_statements: Vec<Statement>,
        #[serde(default)]
        catch_clauses: Vec<CatchClause>,
        #[serde(default)]
        finally_statements: Vec<Statement>,
    },
    VariableDeclaration {
        var_type: TypeReference,
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        init: Option<Expression>,
    },
}

impl Statement {
    pub fn expr(expression: Expression) -> Self {
        Statement::Expression { expression }
    }

    pub fn assign(left: Expression, right: Expression) -> Self {
        Statement::Assign { left, right }
    }

    pub fn ret(expression: Option<Expression>) -> Self {
        Statement::MethodReturn { expression }
    }

    pub fn declare(var_type: TypeReference, name: impl Into<String>, init: Option<Expression>) -> Self {
        Statement::VariableDeclaration {
            var_type,
            name: name.into(),
            init,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Statement::Assign { .. } => "assign",
            Statement::AttachEvent { .. } => "attach_event",
            Statement::Comment(_) => "comment",
            Statement::Condition { .. } => "condition",
            Statement::Expression { .. } => "expression",
            Statement::Goto { .. } => "goto",
            Statement::Iteration { .. } => "iteration",
            Statement::Labeled { .. } => "labeled",
            Statement::LinePragma { .. } => "line_pragma",
            Statement::MethodReturn { .. } => "method_return",
            Statement::RemoveEvent { .. } => "remove_event",
            Statement::Snippet { .. } => "snippet",
            Statement::ThrowException { .. } => "throw_exception",
            Statement::TryCatchFinally { .. } => "try_catch_finally",
            Statement::VariableDeclaration { .. } => "variable_declaration",
        }
    }
}

// ── Attributes and modifiers ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeArgument {
    /// Empty for positional arguments.
    #[serde(default)]
    pub name: String,
    pub value: Expression,
}

/// `[Name(args)]` decoration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDeclaration {
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<AttributeArgument>,
}

impl AttributeDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    Assembly,
    FamilyAndAssembly,
    Family,
    FamilyOrAssembly,
    #[default]
    Private,
    Public,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Abstract,
    Final,
    Static,
    Override,
    Const,
}

/// Member modifiers, mirroring the CodeDom `MemberAttributes` mask.
///
/// `scope == None` means no scope bits were set, which emits as `virtual`
/// for non-private methods and properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MemberAttributesRepr")]
pub struct MemberAttributes {
    pub access: Access,
    pub scope: Option<Scope>,
    pub new_slot: bool,
}

impl Default for MemberAttributes {
    fn default() -> Self {
        Self {
            access: Access::Private,
            scope: Some(Scope::Final),
            new_slot: false,
        }
    }
}

impl MemberAttributes {
    pub const SCOPE_MASK: u32 = 0x000F;
    pub const VTABLE_MASK: u32 = 0x00F0;
    pub const ACCESS_MASK: u32 = 0xF000;
    pub const NEW: u32 = 0x0010;

    pub fn new(access: Access, scope: Option<Scope>) -> Self {
        Self {
            access,
            scope,
            new_slot: false,
        }
    }

    /// `Public | Final`: a plain non-virtual public member.
    pub fn public() -> Self {
        Self::new(Access::Public, Some(Scope::Final))
    }

    /// Decode a CodeDom attribute mask. An access code of zero maps to
    /// `Private`; codes outside the known ranges are rejected.
    pub fn from_bits(bits: u32) -> Option<Self> {
        let access = match (bits & Self::ACCESS_MASK) >> 12 {
            0 | 5 => Access::Private,
            1 => Access::Assembly,
            2 => Access::FamilyAndAssembly,
            3 => Access::Family,
            4 => Access::FamilyOrAssembly,
            6 => Access::Public,
            _ => return None,
        };
        let scope = match bits & Self::SCOPE_MASK {
            0 => None,
            1 => Some(Scope::Abstract),
            2 => Some(Scope::Final),
            3 => Some(Scope::Static),
            4 => Some(Scope::Override),
            5 => Some(Scope::Const),
            _ => return None,
        };
        let new_slot = bits & Self::VTABLE_MASK == Self::NEW;
        Some(Self {
            access,
            scope,
            new_slot,
        })
    }

    pub fn bits(&self) -> u32 {
        let access = match self.access {
            Access::Assembly => 1,
            Access::FamilyAndAssembly => 2,
            Access::Family => 3,
            Access::FamilyOrAssembly => 4,
            Access::Private => 5,
            Access::Public => 6,
        };
        let scope = match self.scope {
            None => 0,
            Some(Scope::Abstract) => 1,
            Some(Scope::Final) => 2,
            Some(Scope::Static) => 3,
            Some(Scope::Override) => 4,
            Some(Scope::Const) => 5,
        };
        let vtable = if self.new_slot { Self::NEW } else { 0 };
        (access << 12) | vtable | scope
    }

    pub fn is_abstract(&self) -> bool {
        self.scope == Some(Scope::Abstract)
    }
}

/// JSON accepts either the raw integer mask or named fields.
#[derive(Deserialize)]
#[serde(untagged)]
enum MemberAttributesRepr {
    Bits(u32),
    Fields {
        #[serde(default)]
        access: Access,
        #[serde(default = "default_scope")]
        scope: Option<Scope>,
        #[serde(default)]
        new_slot: bool,
    },
}

fn default_scope() -> Option<Scope> {
    Some(Scope::Final)
}

impl TryFrom<MemberAttributesRepr> for MemberAttributes {
    type Error = String;

    fn try_from(repr: MemberAttributesRepr) -> Result<Self, Self::Error> {
        match repr {
            MemberAttributesRepr::Bits(bits) => MemberAttributes::from_bits(bits)
                .ok_or_else(|| format!("invalid member attribute mask: {bits:#06x}")),
            MemberAttributesRepr::Fields {
                access,
                scope,
                new_slot,
            } => Ok(MemberAttributes {
                access,
                scope,
                new_slot,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Struct,
    Interface,
    Enum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeVisibility {
    #[default]
    Public,
    NotPublic,
    NestedPublic,
    NestedPrivate,
    NestedFamily,
    NestedAssembly,
    NestedFamilyOrAssembly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeAttributes {
    pub visibility: TypeVisibility,
    pub sealed: bool,
    pub is_abstract: bool,
}

// ── Members ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub field_type: TypeReference,
    #[serde(default)]
    pub attributes: MemberAttributes,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_attributes: Vec<AttributeDeclaration>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_expression: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    #[serde(default = "void_type")]
    pub return_type: TypeReference,
    #[serde(default)]
    pub attributes: MemberAttributes,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_attributes: Vec<AttributeDeclaration>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub parameters: Vec<ParameterDeclaration>,
    #[serde(default)]
    pub statements: Vec<Statement>,
    /// Set for explicit interface implementations (`void IFoo.Bar()`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_implementation_type: Option<TypeReference>,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: TypeReference::void(),
            attributes: MemberAttributes::default(),
            custom_attributes: Vec::new(),
            comments: Vec::new(),
            parameters: Vec::new(),
            statements: Vec::new(),
            private_implementation_type: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub property_type: TypeReference,
    #[serde(default)]
    pub attributes: MemberAttributes,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_attributes: Vec<AttributeDeclaration>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
    /// `None` means no get accessor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get_statements: Option<Vec<Statement>>,
    /// `None` means no set accessor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_statements: Option<Vec<Statement>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Constructor {
    #[serde(default)]
    pub attributes: MemberAttributes,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_attributes: Vec<AttributeDeclaration>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub parameters: Vec<ParameterDeclaration>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub base_constructor_args: Vec<Expression>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chained_constructor_args: Vec<Expression>,
    #[serde(default)]
    pub statements: Vec<Statement>,
}

/// Static initializer (`static T() { ... }`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TypeConstructor {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub event_type: TypeReference,
    #[serde(default)]
    pub attributes: MemberAttributes,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_attributes: Vec<AttributeDeclaration>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Member {
    Field(Field),
    Method(Method),
    /// A method always emitted under the name `Main`.
    EntryPoint(Method),
    Property(Property),
    Constructor(Constructor),
    TypeConstructor(TypeConstructor),
    Event(Event),
    NestedType(TypeDeclaration),
    /// Verbatim member text.
    Snippet { text: String },
}

impl Member {
    pub fn kind(&self) -> &'static str {
        match self {
            Member::Field(_) => "field",
            Member::Method(_) => "method",
            Member::EntryPoint(_) => "entry_point",
            Member::Property(_) => "property",
            Member::Constructor(_) => "constructor",
            Member::TypeConstructor(_) => "type_constructor",
            Member::Event(_) => "event",
            Member::NestedType(_) => "nested_type",
            Member::Snippet { .. } => "snippet",
        }
    }
}

// ── Declarations ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub name: String,
    // `kind` is taken by the member tag when this is a nested type.
    #[serde(default, rename = "type_kind")]
    pub kind: TypeKind,
    #[serde(default)]
    pub type_attributes: TypeAttributes,
    #[serde(default)]
    pub base_types: Vec<TypeReference>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_attributes: Vec<AttributeDeclaration>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

impl TypeDeclaration {
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Class,
            type_attributes: TypeAttributes::default(),
            base_types: Vec::new(),
            members: Vec::new(),
            custom_attributes: Vec::new(),
            comments: Vec::new(),
        }
    }
}

/// A namespace; an empty name emits its contents without a wrapper.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Namespace {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub types: Vec<TypeDeclaration>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

/// Root of the tree: one emitted source file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompileUnit {
    #[serde(default)]
    pub namespaces: Vec<Namespace>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assembly_custom_attributes: Vec<AttributeDeclaration>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_innermost_element_of_jagged_array() {
        let jagged = TypeReference::array(TypeReference::array(TypeReference::new("System.Int32"), 1), 1);
        assert_eq!(jagged.innermost_element().base_type, "System.Int32");
        assert_eq!(jagged.innermost_element().array_rank, 0);
    }

    #[test]
    fn test_member_attributes_default_is_private_final() {
        let attrs = MemberAttributes::default();
        assert_eq!(attrs.access, Access::Private);
        assert_eq!(attrs.scope, Some(Scope::Final));
        assert_eq!(attrs.bits(), 0x5002);
    }

    #[test]
    fn test_member_attributes_from_bits() {
        let attrs = MemberAttributes::from_bits(0x6000 | 0x0010 | 3).unwrap();
        assert_eq!(attrs.access, Access::Public);
        assert_eq!(attrs.scope, Some(Scope::Static));
        assert!(attrs.new_slot);
        assert_eq!(attrs.bits(), 0x6013);
    }

    #[test]
    fn test_member_attributes_zero_access_is_private() {
        let attrs = MemberAttributes::from_bits(0).unwrap();
        assert_eq!(attrs.access, Access::Private);
        assert_eq!(attrs.scope, None);
    }

    #[test]
    fn test_member_attributes_rejects_unknown_codes() {
        assert!(MemberAttributes::from_bits(0x7000).is_none());
        assert!(MemberAttributes::from_bits(0x6006).is_none());
    }

    #[test]
    fn test_member_attributes_deserialize_both_forms() {
        let from_mask: MemberAttributes = serde_json::from_str("24578").unwrap();
        assert_eq!(from_mask, MemberAttributes::public());

        let from_fields: MemberAttributes =
            serde_json::from_str(r#"{"access": "public"}"#).unwrap();
        assert_eq!(from_fields, MemberAttributes::public());

        let no_scope: MemberAttributes =
            serde_json::from_str(r#"{"access": "family", "scope": null}"#).unwrap();
        assert_eq!(no_scope.scope, None);
    }

    #[test]
    fn test_member_attributes_bad_mask_is_an_error() {
        let err = serde_json::from_str::<MemberAttributes>("28672").unwrap_err();
        assert!(err.to_string().contains("invalid member attribute mask"));
    }

    #[test]
    fn test_expression_json_shape() {
        let expr: Expression = serde_json::from_str(
            r#"{"kind": "primitive", "value": {"type": "int", "value": 3}}"#,
        )
        .unwrap();
        assert_eq!(expr, Expression::int(3));

        let this: Expression = serde_json::from_str(r#"{"kind": "this_reference"}"#).unwrap();
        assert_eq!(this, Expression::ThisReference);
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = serde_json::from_str::<Statement>(r#"{"kind": "while_loop"}"#).unwrap_err();
        assert!(err.to_string().contains("unknown variant"));
    }

    #[test]
    fn test_method_defaults_to_void() {
        let m: Method = serde_json::from_str(r#"{"name": "Run"}"#).unwrap();
        assert_eq!(m.return_type, TypeReference::void());
        assert_eq!(m.attributes, MemberAttributes::default());
    }
}
