//! The HIF object model.
//!
//! Every tree element is a [`Node`] allocated in the arena of its [`Tree`];
//! nodes refer to their children through [`NodeId`] handles and know their
//! parent through a non-owning back link. The set of node kinds is closed:
//! every algorithm in the resolution layer is an exhaustive `match` over
//! [`NodeKind`], so a new kind cannot silently fall through.
//!
//! Child handles live either in a single optional slot or in an ordered
//! list. [`NodeKind::slots`] enumerates both uniformly in declaration order,
//! which is what drives generic traversal, in-place replacement and the
//! pairwise child recursion of the equality engine.

use arena::Idx;
use smol_str::SmolStr;

use crate::Name;

pub type NodeId = Idx<Node>;

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub span: Option<crate::Span>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    In,
    Out,
    Inout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
    BwNot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Concat,
    And,
    Or,
    Xor,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Sll,
    Srl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeDir {
    Upto,
    Downto,
}

/// Distinguishes a language-native scalar from one that only exists as a
/// constrained rendition of it (e.g. a bounded integer subtype).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeVariant {
    Native,
    Bounded,
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    // Declarations. Owned by the declaration list of their enclosing scope.
    Const {
        name: Name,
        ty: Option<NodeId>,
        value: Option<NodeId>,
    },
    Variable {
        name: Name,
        ty: Option<NodeId>,
        initial: Option<NodeId>,
    },
    Signal {
        name: Name,
        ty: Option<NodeId>,
        initial: Option<NodeId>,
    },
    Port {
        name: Name,
        direction: Direction,
        ty: Option<NodeId>,
        initial: Option<NodeId>,
    },
    Parameter {
        name: Name,
        direction: Direction,
        ty: Option<NodeId>,
        default: Option<NodeId>,
    },
    /// Generic (template) value parameter.
    ValueTp {
        name: Name,
        ty: Option<NodeId>,
        default: Option<NodeId>,
    },
    /// Generic (template) type parameter.
    TypeTp {
        name: Name,
        default: Option<NodeId>,
    },
    Function {
        name: Name,
        return_ty: Option<NodeId>,
        templates: Vec<NodeId>,
        parameters: Vec<NodeId>,
        declarations: Vec<NodeId>,
    },
    Procedure {
        name: Name,
        templates: Vec<NodeId>,
        parameters: Vec<NodeId>,
        declarations: Vec<NodeId>,
    },
    TypeDef {
        name: Name,
        opaque: bool,
        templates: Vec<NodeId>,
        ty: Option<NodeId>,
    },
    EnumValue {
        name: Name,
        value: Option<NodeId>,
    },
    LibraryDef {
        name: Name,
        standard: bool,
        libraries: Vec<NodeId>,
        declarations: Vec<NodeId>,
    },
    View {
        name: Name,
        templates: Vec<NodeId>,
        ports: Vec<NodeId>,
        libraries: Vec<NodeId>,
        declarations: Vec<NodeId>,
    },
    DesignUnit {
        name: Name,
        views: Vec<NodeId>,
    },
    /// The distinguished root of a complete description.
    System {
        name: Name,
        libraries: Vec<NodeId>,
        declarations: Vec<NodeId>,
        units: Vec<NodeId>,
    },

    // Symbols. Denote a declaration by name; `binding` is the weak,
    // lazily populated declaration cache.
    Identifier {
        name: Name,
        binding: Option<NodeId>,
    },
    FieldRef {
        name: Name,
        binding: Option<NodeId>,
        prefix: Option<NodeId>,
    },
    TypeRef {
        name: Name,
        binding: Option<NodeId>,
        instance: Option<NodeId>,
        templates: Vec<NodeId>,
    },
    ViewRef {
        name: Name,
        binding: Option<NodeId>,
        unit: Option<Name>,
        templates: Vec<NodeId>,
    },
    FunctionCall {
        name: Name,
        binding: Option<NodeId>,
        instance: Option<NodeId>,
        templates: Vec<NodeId>,
        arguments: Vec<NodeId>,
    },
    ProcedureCall {
        name: Name,
        binding: Option<NodeId>,
        instance: Option<NodeId>,
        templates: Vec<NodeId>,
        arguments: Vec<NodeId>,
    },
    Instance {
        name: Name,
        binding: Option<NodeId>,
        referenced: Option<NodeId>,
        port_assigns: Vec<NodeId>,
    },
    /// An imported library. May stay unresolved when it names an opaque
    /// external header.
    Library {
        name: Name,
        binding: Option<NodeId>,
        standard: bool,
    },

    // Actual arguments. Unnamed until the matching engine stamps them.
    ParamAssign {
        name: Option<Name>,
        value: Option<NodeId>,
    },
    PortAssign {
        name: Option<Name>,
        value: Option<NodeId>,
    },
    ValueTpAssign {
        name: Option<Name>,
        value: Option<NodeId>,
    },
    TypeTpAssign {
        name: Option<Name>,
        ty: Option<NodeId>,
    },

    // Values.
    IntLit {
        value: i64,
    },
    RealLit {
        value: f64,
    },
    BoolLit {
        value: bool,
    },
    StringLit {
        value: SmolStr,
    },
    Unary {
        op: UnaryOp,
        operand: Option<NodeId>,
    },
    Binary {
        op: BinaryOp,
        lhs: Option<NodeId>,
        rhs: Option<NodeId>,
    },
    Aggregate {
        elements: Vec<NodeId>,
        others: Option<NodeId>,
    },
    Range {
        dir: RangeDir,
        left: Option<NodeId>,
        right: Option<NodeId>,
    },
    Cast {
        ty: Option<NodeId>,
        value: Option<NodeId>,
    },

    // Types.
    IntType {
        signed: bool,
        constexpr: bool,
        variant: TypeVariant,
        span: Option<NodeId>,
    },
    BoolType,
    BitType {
        logic: bool,
        resolved: bool,
    },
    BitvectorType {
        signed: bool,
        logic: bool,
        resolved: bool,
        variant: TypeVariant,
        span: Option<NodeId>,
    },
    ArrayType {
        span: Option<NodeId>,
        element: Option<NodeId>,
    },
    RecordType {
        fields: Vec<NodeId>,
    },
    EnumType {
        values: Vec<NodeId>,
    },
    StringType {
        span: Option<NodeId>,
    },
}

/// Fieldless discriminant of [`NodeKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Const,
    Variable,
    Signal,
    Port,
    Parameter,
    ValueTp,
    TypeTp,
    Function,
    Procedure,
    TypeDef,
    EnumValue,
    LibraryDef,
    View,
    DesignUnit,
    System,
    Identifier,
    FieldRef,
    TypeRef,
    ViewRef,
    FunctionCall,
    ProcedureCall,
    Instance,
    Library,
    ParamAssign,
    PortAssign,
    ValueTpAssign,
    TypeTpAssign,
    IntLit,
    RealLit,
    BoolLit,
    StringLit,
    Unary,
    Binary,
    Aggregate,
    Range,
    Cast,
    IntType,
    BoolType,
    BitType,
    BitvectorType,
    ArrayType,
    RecordType,
    EnumType,
    StringType,
}

/// Addresses an optional single-child slot of a node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Type,
    Value,
    Default,
    Initial,
    Prefix,
    Instance,
    Referenced,
    ReturnType,
    Operand,
    Lhs,
    Rhs,
    Left,
    Right,
    Others,
    Element,
    Span,
}

/// Addresses an ordered owned child list of a node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListRole {
    Declarations,
    Libraries,
    Templates,
    Parameters,
    Ports,
    Views,
    Units,
    Arguments,
    PortAssigns,
    Fields,
    Values,
    Elements,
}

/// A single child slot, read-only view.
pub enum Slot<'a> {
    Single(Option<NodeId>),
    List(&'a [NodeId]),
}

/// A single child slot, mutable view.
pub enum SlotMut<'a> {
    Single(&'a mut Option<NodeId>),
    List(&'a mut Vec<NodeId>),
}

macro_rules! slots {
    ($($e:expr),* $(,)?) => { vec![$($e),*] };
}

impl NodeKind {
    pub fn tag(&self) -> Tag {
        match self {
            NodeKind::Const { .. } => Tag::Const,
            NodeKind::Variable { .. } => Tag::Variable,
            NodeKind::Signal { .. } => Tag::Signal,
            NodeKind::Port { .. } => Tag::Port,
            NodeKind::Parameter { .. } => Tag::Parameter,
            NodeKind::ValueTp { .. } => Tag::ValueTp,
            NodeKind::TypeTp { .. } => Tag::TypeTp,
            NodeKind::Function { .. } => Tag::Function,
            NodeKind::Procedure { .. } => Tag::Procedure,
            NodeKind::TypeDef { .. } => Tag::TypeDef,
            NodeKind::EnumValue { .. } => Tag::EnumValue,
            NodeKind::LibraryDef { .. } => Tag::LibraryDef,
            NodeKind::View { .. } => Tag::View,
            NodeKind::DesignUnit { .. } => Tag::DesignUnit,
            NodeKind::System { .. } => Tag::System,
            NodeKind::Identifier { .. } => Tag::Identifier,
            NodeKind::FieldRef { .. } => Tag::FieldRef,
            NodeKind::TypeRef { .. } => Tag::TypeRef,
            NodeKind::ViewRef { .. } => Tag::ViewRef,
            NodeKind::FunctionCall { .. } => Tag::FunctionCall,
            NodeKind::ProcedureCall { .. } => Tag::ProcedureCall,
            NodeKind::Instance { .. } => Tag::Instance,
            NodeKind::Library { .. } => Tag::Library,
            NodeKind::ParamAssign { .. } => Tag::ParamAssign,
            NodeKind::PortAssign { .. } => Tag::PortAssign,
            NodeKind::ValueTpAssign { .. } => Tag::ValueTpAssign,
            NodeKind::TypeTpAssign { .. } => Tag::TypeTpAssign,
            NodeKind::IntLit { .. } => Tag::IntLit,
            NodeKind::RealLit { .. } => Tag::RealLit,
            NodeKind::BoolLit { .. } => Tag::BoolLit,
            NodeKind::StringLit { .. } => Tag::StringLit,
            NodeKind::Unary { .. } => Tag::Unary,
            NodeKind::Binary { .. } => Tag::Binary,
            NodeKind::Aggregate { .. } => Tag::Aggregate,
            NodeKind::Range { .. } => Tag::Range,
            NodeKind::Cast { .. } => Tag::Cast,
            NodeKind::IntType { .. } => Tag::IntType,
            NodeKind::BoolType => Tag::BoolType,
            NodeKind::BitType { .. } => Tag::BitType,
            NodeKind::BitvectorType { .. } => Tag::BitvectorType,
            NodeKind::ArrayType { .. } => Tag::ArrayType,
            NodeKind::RecordType { .. } => Tag::RecordType,
            NodeKind::EnumType { .. } => Tag::EnumType,
            NodeKind::StringType { .. } => Tag::StringType,
        }
    }

    /// The declared name of a declaration, or the referenced name of a
    /// symbol. `None` for values, types and assigns.
    pub fn name(&self) -> Option<&Name> {
        match self {
            NodeKind::Const { name, .. }
            | NodeKind::Variable { name, .. }
            | NodeKind::Signal { name, .. }
            | NodeKind::Port { name, .. }
            | NodeKind::Parameter { name, .. }
            | NodeKind::ValueTp { name, .. }
            | NodeKind::TypeTp { name, .. }
            | NodeKind::Function { name, .. }
            | NodeKind::Procedure { name, .. }
            | NodeKind::TypeDef { name, .. }
            | NodeKind::EnumValue { name, .. }
            | NodeKind::LibraryDef { name, .. }
            | NodeKind::View { name, .. }
            | NodeKind::DesignUnit { name, .. }
            | NodeKind::System { name, .. }
            | NodeKind::Identifier { name, .. }
            | NodeKind::FieldRef { name, .. }
            | NodeKind::TypeRef { name, .. }
            | NodeKind::ViewRef { name, .. }
            | NodeKind::FunctionCall { name, .. }
            | NodeKind::ProcedureCall { name, .. }
            | NodeKind::Instance { name, .. }
            | NodeKind::Library { name, .. } => Some(name),
            NodeKind::ParamAssign { name, .. }
            | NodeKind::PortAssign { name, .. }
            | NodeKind::ValueTpAssign { name, .. }
            | NodeKind::TypeTpAssign { name, .. } => name.as_ref(),
            _ => None,
        }
    }

    /// The name slot of an actual-argument node.
    pub fn assign_name(&self) -> Option<&Name> {
        match self {
            NodeKind::ParamAssign { name, .. }
            | NodeKind::PortAssign { name, .. }
            | NodeKind::ValueTpAssign { name, .. }
            | NodeKind::TypeTpAssign { name, .. } => name.as_ref(),
            _ => None,
        }
    }

    /// Stamps the name of an actual-argument node. Returns `false` when the
    /// kind has no assign name slot.
    pub fn set_assign_name(&mut self, new: Name) -> bool {
        match self {
            NodeKind::ParamAssign { name, .. }
            | NodeKind::PortAssign { name, .. }
            | NodeKind::ValueTpAssign { name, .. }
            | NodeKind::TypeTpAssign { name, .. } => {
                *name = Some(new);
                true
            }
            _ => false,
        }
    }

    /// The cached declaration of a symbol-bearing node, if any.
    pub fn binding(&self) -> Option<NodeId> {
        match self {
            NodeKind::Identifier { binding, .. }
            | NodeKind::FieldRef { binding, .. }
            | NodeKind::TypeRef { binding, .. }
            | NodeKind::ViewRef { binding, .. }
            | NodeKind::FunctionCall { binding, .. }
            | NodeKind::ProcedureCall { binding, .. }
            | NodeKind::Instance { binding, .. }
            | NodeKind::Library { binding, .. } => *binding,
            _ => None,
        }
    }

    /// Overwrites the declaration cache of a symbol-bearing node. Returns
    /// `false` when the kind carries no cache.
    pub fn set_binding(&mut self, decl: Option<NodeId>) -> bool {
        match self {
            NodeKind::Identifier { binding, .. }
            | NodeKind::FieldRef { binding, .. }
            | NodeKind::TypeRef { binding, .. }
            | NodeKind::ViewRef { binding, .. }
            | NodeKind::FunctionCall { binding, .. }
            | NodeKind::ProcedureCall { binding, .. }
            | NodeKind::Instance { binding, .. }
            | NodeKind::Library { binding, .. } => {
                *binding = decl;
                true
            }
            _ => false,
        }
    }

    pub fn is_symbol(&self) -> bool {
        matches!(
            self.tag(),
            Tag::Identifier
                | Tag::FieldRef
                | Tag::TypeRef
                | Tag::ViewRef
                | Tag::FunctionCall
                | Tag::ProcedureCall
                | Tag::Instance
                | Tag::Library
        )
    }

    pub fn is_declaration(&self) -> bool {
        matches!(
            self.tag(),
            Tag::Const
                | Tag::Variable
                | Tag::Signal
                | Tag::Port
                | Tag::Parameter
                | Tag::ValueTp
                | Tag::TypeTp
                | Tag::Function
                | Tag::Procedure
                | Tag::TypeDef
                | Tag::EnumValue
                | Tag::LibraryDef
                | Tag::View
                | Tag::DesignUnit
                | Tag::System
        )
    }

    pub fn is_type(&self) -> bool {
        matches!(
            self.tag(),
            Tag::IntType
                | Tag::BoolType
                | Tag::BitType
                | Tag::BitvectorType
                | Tag::ArrayType
                | Tag::RecordType
                | Tag::EnumType
                | Tag::StringType
        )
    }

    pub fn is_assign(&self) -> bool {
        matches!(
            self.tag(),
            Tag::ParamAssign | Tag::PortAssign | Tag::ValueTpAssign | Tag::TypeTpAssign
        )
    }

    /// A generic (template) parameter declaration.
    pub fn is_template_decl(&self) -> bool {
        matches!(self.tag(), Tag::ValueTp | Tag::TypeTp)
    }

    /// Scopes own at least one declaration/library/template list.
    pub fn is_scope(&self) -> bool {
        matches!(
            self.tag(),
            Tag::Function | Tag::Procedure | Tag::LibraryDef | Tag::View | Tag::System
        )
    }

    pub fn kind_name(&self) -> &'static str {
        match self.tag() {
            Tag::Const => "const",
            Tag::Variable => "variable",
            Tag::Signal => "signal",
            Tag::Port => "port",
            Tag::Parameter => "parameter",
            Tag::ValueTp => "value_tp",
            Tag::TypeTp => "type_tp",
            Tag::Function => "function",
            Tag::Procedure => "procedure",
            Tag::TypeDef => "typedef",
            Tag::EnumValue => "enum_value",
            Tag::LibraryDef => "library_def",
            Tag::View => "view",
            Tag::DesignUnit => "design_unit",
            Tag::System => "system",
            Tag::Identifier => "identifier",
            Tag::FieldRef => "field_ref",
            Tag::TypeRef => "type_ref",
            Tag::ViewRef => "view_ref",
            Tag::FunctionCall => "function_call",
            Tag::ProcedureCall => "procedure_call",
            Tag::Instance => "instance",
            Tag::Library => "library",
            Tag::ParamAssign => "param_assign",
            Tag::PortAssign => "port_assign",
            Tag::ValueTpAssign => "value_tp_assign",
            Tag::TypeTpAssign => "type_tp_assign",
            Tag::IntLit => "int",
            Tag::RealLit => "real",
            Tag::BoolLit => "bool",
            Tag::StringLit => "string",
            Tag::Unary => "unary",
            Tag::Binary => "binary",
            Tag::Aggregate => "aggregate",
            Tag::Range => "range",
            Tag::Cast => "cast",
            Tag::IntType => "int_type",
            Tag::BoolType => "bool_type",
            Tag::BitType => "bit_type",
            Tag::BitvectorType => "bitvector_type",
            Tag::ArrayType => "array_type",
            Tag::RecordType => "record_type",
            Tag::EnumType => "enum_type",
            Tag::StringType => "string_type",
        }
    }

    /// All child slots in declaration order.
    pub fn slots(&self) -> Vec<Slot<'_>> {
        use Slot::{List, Single};
        match self {
            NodeKind::Const { ty, value, .. } => slots![Single(*ty), Single(*value)],
            NodeKind::Variable { ty, initial, .. } | NodeKind::Signal { ty, initial, .. } => {
                slots![Single(*ty), Single(*initial)]
            }
            NodeKind::Port { ty, initial, .. } => slots![Single(*ty), Single(*initial)],
            NodeKind::Parameter { ty, default, .. } | NodeKind::ValueTp { ty, default, .. } => {
                slots![Single(*ty), Single(*default)]
            }
            NodeKind::TypeTp { default, .. } => slots![Single(*default)],
            NodeKind::Function { return_ty, templates, parameters, declarations, .. } => {
                slots![Single(*return_ty), List(templates), List(parameters), List(declarations)]
            }
            NodeKind::Procedure { templates, parameters, declarations, .. } => {
                slots![List(templates), List(parameters), List(declarations)]
            }
            NodeKind::TypeDef { templates, ty, .. } => slots![List(templates), Single(*ty)],
            NodeKind::EnumValue { value, .. } => slots![Single(*value)],
            NodeKind::LibraryDef { libraries, declarations, .. } => {
                slots![List(libraries), List(declarations)]
            }
            NodeKind::View { templates, ports, libraries, declarations, .. } => {
                slots![List(templates), List(ports), List(libraries), List(declarations)]
            }
            NodeKind::DesignUnit { views, .. } => slots![List(views)],
            NodeKind::System { libraries, declarations, units, .. } => {
                slots![List(libraries), List(declarations), List(units)]
            }
            NodeKind::Identifier { .. } | NodeKind::Library { .. } => slots![],
            NodeKind::FieldRef { prefix, .. } => slots![Single(*prefix)],
            NodeKind::TypeRef { instance, templates, .. } => {
                slots![Single(*instance), List(templates)]
            }
            NodeKind::ViewRef { templates, .. } => slots![List(templates)],
            NodeKind::FunctionCall { instance, templates, arguments, .. }
            | NodeKind::ProcedureCall { instance, templates, arguments, .. } => {
                slots![Single(*instance), List(templates), List(arguments)]
            }
            NodeKind::Instance { referenced, port_assigns, .. } => {
                slots![Single(*referenced), List(port_assigns)]
            }
            NodeKind::ParamAssign { value, .. }
            | NodeKind::PortAssign { value, .. }
            | NodeKind::ValueTpAssign { value, .. } => slots![Single(*value)],
            NodeKind::TypeTpAssign { ty, .. } => slots![Single(*ty)],
            NodeKind::IntLit { .. }
            | NodeKind::RealLit { .. }
            | NodeKind::BoolLit { .. }
            | NodeKind::StringLit { .. } => slots![],
            NodeKind::Unary { operand, .. } => slots![Single(*operand)],
            NodeKind::Binary { lhs, rhs, .. } => slots![Single(*lhs), Single(*rhs)],
            NodeKind::Aggregate { elements, others } => slots![List(elements), Single(*others)],
            NodeKind::Range { left, right, .. } => slots![Single(*left), Single(*right)],
            NodeKind::Cast { ty, value } => slots![Single(*ty), Single(*value)],
            NodeKind::IntType { span, .. } => slots![Single(*span)],
            NodeKind::BoolType | NodeKind::BitType { .. } => slots![],
            NodeKind::BitvectorType { span, .. } => slots![Single(*span)],
            NodeKind::ArrayType { span, element } => slots![Single(*span), Single(*element)],
            NodeKind::RecordType { fields } => slots![List(fields)],
            NodeKind::EnumType { values } => slots![List(values)],
            NodeKind::StringType { span } => slots![Single(*span)],
        }
    }

    /// All child slots in declaration order, mutable.
    pub fn slots_mut(&mut self) -> Vec<SlotMut<'_>> {
        use SlotMut::{List, Single};
        match self {
            NodeKind::Const { ty, value, .. } => slots![Single(ty), Single(value)],
            NodeKind::Variable { ty, initial, .. } | NodeKind::Signal { ty, initial, .. } => {
                slots![Single(ty), Single(initial)]
            }
            NodeKind::Port { ty, initial, .. } => slots![Single(ty), Single(initial)],
            NodeKind::Parameter { ty, default, .. } | NodeKind::ValueTp { ty, default, .. } => {
                slots![Single(ty), Single(default)]
            }
            NodeKind::TypeTp { default, .. } => slots![Single(default)],
            NodeKind::Function { return_ty, templates, parameters, declarations, .. } => {
                slots![Single(return_ty), List(templates), List(parameters), List(declarations)]
            }
            NodeKind::Procedure { templates, parameters, declarations, .. } => {
                slots![List(templates), List(parameters), List(declarations)]
            }
            NodeKind::TypeDef { templates, ty, .. } => slots![List(templates), Single(ty)],
            NodeKind::EnumValue { value, .. } => slots![Single(value)],
            NodeKind::LibraryDef { libraries, declarations, .. } => {
                slots![List(libraries), List(declarations)]
            }
            NodeKind::View { templates, ports, libraries, declarations, .. } => {
                slots![List(templates), List(ports), List(libraries), List(declarations)]
            }
            NodeKind::DesignUnit { views, .. } => slots![List(views)],
            NodeKind::System { libraries, declarations, units, .. } => {
                slots![List(libraries), List(declarations), List(units)]
            }
            NodeKind::Identifier { .. } | NodeKind::Library { .. } => slots![],
            NodeKind::FieldRef { prefix, .. } => slots![Single(prefix)],
            NodeKind::TypeRef { instance, templates, .. } => {
                slots![Single(instance), List(templates)]
            }
            NodeKind::ViewRef { templates, .. } => slots![List(templates)],
            NodeKind::FunctionCall { instance, templates, arguments, .. }
            | NodeKind::ProcedureCall { instance, templates, arguments, .. } => {
                slots![Single(instance), List(templates), List(arguments)]
            }
            NodeKind::Instance { referenced, port_assigns, .. } => {
                slots![Single(referenced), List(port_assigns)]
            }
            NodeKind::ParamAssign { value, .. }
            | NodeKind::PortAssign { value, .. }
            | NodeKind::ValueTpAssign { value, .. } => slots![Single(value)],
            NodeKind::TypeTpAssign { ty, .. } => slots![Single(ty)],
            NodeKind::IntLit { .. }
            | NodeKind::RealLit { .. }
            | NodeKind::BoolLit { .. }
            | NodeKind::StringLit { .. } => slots![],
            NodeKind::Unary { operand, .. } => slots![Single(operand)],
            NodeKind::Binary { lhs, rhs, .. } => slots![Single(lhs), Single(rhs)],
            NodeKind::Aggregate { elements, others } => slots![List(elements), Single(others)],
            NodeKind::Range { left, right, .. } => slots![Single(left), Single(right)],
            NodeKind::Cast { ty, value } => slots![Single(ty), Single(value)],
            NodeKind::IntType { span, .. } => slots![Single(span)],
            NodeKind::BoolType | NodeKind::BitType { .. } => slots![],
            NodeKind::BitvectorType { span, .. } => slots![Single(span)],
            NodeKind::ArrayType { span, element } => slots![Single(span), Single(element)],
            NodeKind::RecordType { fields } => slots![List(fields)],
            NodeKind::EnumType { values } => slots![List(values)],
            NodeKind::StringType { span } => slots![Single(span)],
        }
    }

    /// All children in slot order, flattened.
    pub fn children(&self) -> Vec<NodeId> {
        let mut res = Vec::new();
        for slot in self.slots() {
            match slot {
                Slot::Single(id) => res.extend(id),
                Slot::List(ids) => res.extend_from_slice(ids),
            }
        }
        res
    }

    /// Looks up a single-child slot by role.
    pub fn single(&self, field: Field) -> Option<NodeId> {
        self.single_ref(field).copied().flatten()
    }

    fn single_ref(&self, field: Field) -> Option<&Option<NodeId>> {
        match (self, field) {
            (
                NodeKind::Const { ty, .. }
                | NodeKind::Variable { ty, .. }
                | NodeKind::Signal { ty, .. }
                | NodeKind::Port { ty, .. }
                | NodeKind::Parameter { ty, .. }
                | NodeKind::ValueTp { ty, .. }
                | NodeKind::TypeDef { ty, .. }
                | NodeKind::Cast { ty, .. }
                | NodeKind::TypeTpAssign { ty, .. },
                Field::Type,
            ) => Some(ty),
            (
                NodeKind::Const { value, .. }
                | NodeKind::EnumValue { value, .. }
                | NodeKind::ParamAssign { value, .. }
                | NodeKind::PortAssign { value, .. }
                | NodeKind::ValueTpAssign { value, .. }
                | NodeKind::Cast { value, .. },
                Field::Value,
            ) => Some(value),
            (
                NodeKind::Parameter { default, .. }
                | NodeKind::ValueTp { default, .. }
                | NodeKind::TypeTp { default, .. },
                Field::Default,
            ) => Some(default),
            (
                NodeKind::Variable { initial, .. }
                | NodeKind::Signal { initial, .. }
                | NodeKind::Port { initial, .. },
                Field::Initial,
            ) => Some(initial),
            (NodeKind::FieldRef { prefix, .. }, Field::Prefix) => Some(prefix),
            (
                NodeKind::TypeRef { instance, .. }
                | NodeKind::FunctionCall { instance, .. }
                | NodeKind::ProcedureCall { instance, .. },
                Field::Instance,
            ) => Some(instance),
            (NodeKind::Instance { referenced, .. }, Field::Referenced) => Some(referenced),
            (NodeKind::Function { return_ty, .. }, Field::ReturnType) => Some(return_ty),
            (NodeKind::Unary { operand, .. }, Field::Operand) => Some(operand),
            (NodeKind::Binary { lhs, .. }, Field::Lhs) => Some(lhs),
            (NodeKind::Binary { rhs, .. }, Field::Rhs) => Some(rhs),
            (NodeKind::Range { left, .. }, Field::Left) => Some(left),
            (NodeKind::Range { right, .. }, Field::Right) => Some(right),
            (NodeKind::Aggregate { others, .. }, Field::Others) => Some(others),
            (NodeKind::ArrayType { element, .. }, Field::Element) => Some(element),
            (
                NodeKind::IntType { span, .. }
                | NodeKind::BitvectorType { span, .. }
                | NodeKind::ArrayType { span, .. }
                | NodeKind::StringType { span },
                Field::Span,
            ) => Some(span),
            _ => None,
        }
    }

    pub(crate) fn single_mut(&mut self, field: Field) -> Option<&mut Option<NodeId>> {
        match (self, field) {
            (
                NodeKind::Const { ty, .. }
                | NodeKind::Variable { ty, .. }
                | NodeKind::Signal { ty, .. }
                | NodeKind::Port { ty, .. }
                | NodeKind::Parameter { ty, .. }
                | NodeKind::ValueTp { ty, .. }
                | NodeKind::TypeDef { ty, .. }
                | NodeKind::Cast { ty, .. }
                | NodeKind::TypeTpAssign { ty, .. },
                Field::Type,
            ) => Some(ty),
            (
                NodeKind::Const { value, .. }
                | NodeKind::EnumValue { value, .. }
                | NodeKind::ParamAssign { value, .. }
                | NodeKind::PortAssign { value, .. }
                | NodeKind::ValueTpAssign { value, .. }
                | NodeKind::Cast { value, .. },
                Field::Value,
            ) => Some(value),
            (
                NodeKind::Parameter { default, .. }
                | NodeKind::ValueTp { default, .. }
                | NodeKind::TypeTp { default, .. },
                Field::Default,
            ) => Some(default),
            (
                NodeKind::Variable { initial, .. }
                | NodeKind::Signal { initial, .. }
                | NodeKind::Port { initial, .. },
                Field::Initial,
            ) => Some(initial),
            (NodeKind::FieldRef { prefix, .. }, Field::Prefix) => Some(prefix),
            (
                NodeKind::TypeRef { instance, .. }
                | NodeKind::FunctionCall { instance, .. }
                | NodeKind::ProcedureCall { instance, .. },
                Field::Instance,
            ) => Some(instance),
            (NodeKind::Instance { referenced, .. }, Field::Referenced) => Some(referenced),
            (NodeKind::Function { return_ty, .. }, Field::ReturnType) => Some(return_ty),
            (NodeKind::Unary { operand, .. }, Field::Operand) => Some(operand),
            (NodeKind::Binary { lhs, .. }, Field::Lhs) => Some(lhs),
            (NodeKind::Binary { rhs, .. }, Field::Rhs) => Some(rhs),
            (NodeKind::Range { left, .. }, Field::Left) => Some(left),
            (NodeKind::Range { right, .. }, Field::Right) => Some(right),
            (NodeKind::Aggregate { others, .. }, Field::Others) => Some(others),
            (NodeKind::ArrayType { element, .. }, Field::Element) => Some(element),
            (
                NodeKind::IntType { span, .. }
                | NodeKind::BitvectorType { span, .. }
                | NodeKind::ArrayType { span, .. }
                | NodeKind::StringType { span },
                Field::Span,
            ) => Some(span),
            _ => None,
        }
    }

    /// Looks up an ordered child list by role.
    pub fn list(&self, role: ListRole) -> Option<&[NodeId]> {
        let list = match (self, role) {
            (
                NodeKind::Function { declarations, .. }
                | NodeKind::Procedure { declarations, .. }
                | NodeKind::LibraryDef { declarations, .. }
                | NodeKind::View { declarations, .. }
                | NodeKind::System { declarations, .. },
                ListRole::Declarations,
            ) => declarations,
            (
                NodeKind::LibraryDef { libraries, .. }
                | NodeKind::View { libraries, .. }
                | NodeKind::System { libraries, .. },
                ListRole::Libraries,
            ) => libraries,
            (
                NodeKind::Function { templates, .. }
                | NodeKind::Procedure { templates, .. }
                | NodeKind::TypeDef { templates, .. }
                | NodeKind::View { templates, .. }
                | NodeKind::TypeRef { templates, .. }
                | NodeKind::ViewRef { templates, .. }
                | NodeKind::FunctionCall { templates, .. }
                | NodeKind::ProcedureCall { templates, .. },
                ListRole::Templates,
            ) => templates,
            (
                NodeKind::Function { parameters, .. } | NodeKind::Procedure { parameters, .. },
                ListRole::Parameters,
            ) => parameters,
            (NodeKind::View { ports, .. }, ListRole::Ports) => ports,
            (NodeKind::DesignUnit { views, .. }, ListRole::Views) => views,
            (NodeKind::System { units, .. }, ListRole::Units) => units,
            (
                NodeKind::FunctionCall { arguments, .. } | NodeKind::ProcedureCall { arguments, .. },
                ListRole::Arguments,
            ) => arguments,
            (NodeKind::Instance { port_assigns, .. }, ListRole::PortAssigns) => port_assigns,
            (NodeKind::RecordType { fields }, ListRole::Fields) => fields,
            (NodeKind::EnumType { values }, ListRole::Values) => values,
            (NodeKind::Aggregate { elements, .. }, ListRole::Elements) => elements,
            _ => return None,
        };
        Some(list)
    }

    pub(crate) fn list_mut(&mut self, role: ListRole) -> Option<&mut Vec<NodeId>> {
        let list = match (self, role) {
            (
                NodeKind::Function { declarations, .. }
                | NodeKind::Procedure { declarations, .. }
                | NodeKind::LibraryDef { declarations, .. }
                | NodeKind::View { declarations, .. }
                | NodeKind::System { declarations, .. },
                ListRole::Declarations,
            ) => declarations,
            (
                NodeKind::LibraryDef { libraries, .. }
                | NodeKind::View { libraries, .. }
                | NodeKind::System { libraries, .. },
                ListRole::Libraries,
            ) => libraries,
            (
                NodeKind::Function { templates, .. }
                | NodeKind::Procedure { templates, .. }
                | NodeKind::TypeDef { templates, .. }
                | NodeKind::View { templates, .. }
                | NodeKind::TypeRef { templates, .. }
                | NodeKind::ViewRef { templates, .. }
                | NodeKind::FunctionCall { templates, .. }
                | NodeKind::ProcedureCall { templates, .. },
                ListRole::Templates,
            ) => templates,
            (
                NodeKind::Function { parameters, .. } | NodeKind::Procedure { parameters, .. },
                ListRole::Parameters,
            ) => parameters,
            (NodeKind::View { ports, .. }, ListRole::Ports) => ports,
            (NodeKind::DesignUnit { views, .. }, ListRole::Views) => views,
            (NodeKind::System { units, .. }, ListRole::Units) => units,
            (
                NodeKind::FunctionCall { arguments, .. } | NodeKind::ProcedureCall { arguments, .. },
                ListRole::Arguments,
            ) => arguments,
            (NodeKind::Instance { port_assigns, .. }, ListRole::PortAssigns) => port_assigns,
            (NodeKind::RecordType { fields }, ListRole::Fields) => fields,
            (NodeKind::EnumType { values }, ListRole::Values) => values,
            (NodeKind::Aggregate { elements, .. }, ListRole::Elements) => elements,
            _ => return None,
        };
        Some(list)
    }
}
