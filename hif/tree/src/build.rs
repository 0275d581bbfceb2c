//! Shorthand constructors.
//!
//! Thin sugar over [`Tree::alloc`] used by the frontends and throughout the
//! test suites. Every constructor returns an unowned node; attaching it
//! somewhere is the caller's business (or happens implicitly through the
//! list arguments, which are attached on the spot).

use crate::node::{
    BinaryOp, Direction, ListRole, NodeId, NodeKind, RangeDir, TypeVariant, UnaryOp,
};
use crate::{Name, Tree};

impl Tree {
    pub fn system(&mut self, name: impl Into<Name>) -> NodeId {
        let id = self.alloc(NodeKind::System {
            name: name.into(),
            libraries: Vec::new(),
            declarations: Vec::new(),
            units: Vec::new(),
        });
        self.set_root(id);
        id
    }

    pub fn ident(&mut self, name: impl Into<Name>) -> NodeId {
        self.alloc(NodeKind::Identifier { name: name.into(), binding: None })
    }

    pub fn int_lit(&mut self, value: i64) -> NodeId {
        self.alloc(NodeKind::IntLit { value })
    }

    pub fn real_lit(&mut self, value: f64) -> NodeId {
        self.alloc(NodeKind::RealLit { value })
    }

    pub fn bool_lit(&mut self, value: bool) -> NodeId {
        self.alloc(NodeKind::BoolLit { value })
    }

    pub fn string_lit(&mut self, value: &str) -> NodeId {
        self.alloc(NodeKind::StringLit { value: value.into() })
    }

    pub fn unary(&mut self, op: UnaryOp, operand: NodeId) -> NodeId {
        let id = self.alloc(NodeKind::Unary { op, operand: Some(operand) });
        self[operand].parent = Some(id);
        id
    }

    pub fn binary(&mut self, op: BinaryOp, lhs: NodeId, rhs: NodeId) -> NodeId {
        let id = self.alloc(NodeKind::Binary { op, lhs: Some(lhs), rhs: Some(rhs) });
        self[lhs].parent = Some(id);
        self[rhs].parent = Some(id);
        id
    }

    pub fn range(&mut self, dir: RangeDir, left: NodeId, right: NodeId) -> NodeId {
        let id = self.alloc(NodeKind::Range { dir, left: Some(left), right: Some(right) });
        self[left].parent = Some(id);
        self[right].parent = Some(id);
        id
    }

    pub fn int_type(&mut self, signed: bool, span: Option<NodeId>) -> NodeId {
        let id = self.alloc(NodeKind::IntType {
            signed,
            constexpr: false,
            variant: TypeVariant::Native,
            span,
        });
        if let Some(span) = span {
            self[span].parent = Some(id);
        }
        id
    }

    pub fn bool_type(&mut self) -> NodeId {
        self.alloc(NodeKind::BoolType)
    }

    pub fn bit_type(&mut self, logic: bool, resolved: bool) -> NodeId {
        self.alloc(NodeKind::BitType { logic, resolved })
    }

    pub fn bitvector_type(
        &mut self,
        signed: bool,
        logic: bool,
        resolved: bool,
        span: Option<NodeId>,
    ) -> NodeId {
        let id = self.alloc(NodeKind::BitvectorType {
            signed,
            logic,
            resolved,
            variant: TypeVariant::Native,
            span,
        });
        if let Some(span) = span {
            self[span].parent = Some(id);
        }
        id
    }

    pub fn array_type(&mut self, span: Option<NodeId>, element: NodeId) -> NodeId {
        let id = self.alloc(NodeKind::ArrayType { span, element: Some(element) });
        if let Some(span) = span {
            self[span].parent = Some(id);
        }
        self[element].parent = Some(id);
        id
    }

    pub fn type_ref(&mut self, name: impl Into<Name>) -> NodeId {
        self.alloc(NodeKind::TypeRef {
            name: name.into(),
            binding: None,
            instance: None,
            templates: Vec::new(),
        })
    }

    pub fn variable(&mut self, name: impl Into<Name>, ty: Option<NodeId>) -> NodeId {
        let id = self.alloc(NodeKind::Variable { name: name.into(), ty, initial: None });
        if let Some(ty) = ty {
            self[ty].parent = Some(id);
        }
        id
    }

    pub fn signal(&mut self, name: impl Into<Name>, ty: Option<NodeId>) -> NodeId {
        let id = self.alloc(NodeKind::Signal { name: name.into(), ty, initial: None });
        if let Some(ty) = ty {
            self[ty].parent = Some(id);
        }
        id
    }

    pub fn constant(&mut self, name: impl Into<Name>, ty: Option<NodeId>, value: Option<NodeId>) -> NodeId {
        let id = self.alloc(NodeKind::Const { name: name.into(), ty, value });
        for child in [ty, value].into_iter().flatten() {
            self[child].parent = Some(id);
        }
        id
    }

    pub fn parameter(
        &mut self,
        name: impl Into<Name>,
        ty: Option<NodeId>,
        default: Option<NodeId>,
    ) -> NodeId {
        let id = self.alloc(NodeKind::Parameter {
            name: name.into(),
            direction: Direction::In,
            ty,
            default,
        });
        for child in [ty, default].into_iter().flatten() {
            self[child].parent = Some(id);
        }
        id
    }

    pub fn value_tp(
        &mut self,
        name: impl Into<Name>,
        ty: Option<NodeId>,
        default: Option<NodeId>,
    ) -> NodeId {
        let id = self.alloc(NodeKind::ValueTp { name: name.into(), ty, default });
        for child in [ty, default].into_iter().flatten() {
            self[child].parent = Some(id);
        }
        id
    }

    pub fn type_tp(&mut self, name: impl Into<Name>, default: Option<NodeId>) -> NodeId {
        let id = self.alloc(NodeKind::TypeTp { name: name.into(), default });
        if let Some(default) = default {
            self[default].parent = Some(id);
        }
        id
    }

    pub fn function(
        &mut self,
        name: impl Into<Name>,
        return_ty: Option<NodeId>,
        templates: Vec<NodeId>,
        parameters: Vec<NodeId>,
    ) -> NodeId {
        let id = self.alloc(NodeKind::Function {
            name: name.into(),
            return_ty: None,
            templates: Vec::new(),
            parameters: Vec::new(),
            declarations: Vec::new(),
        });
        if let Some(ty) = return_ty {
            self.set_single(id, crate::node::Field::ReturnType, Some(ty));
        }
        for tp in templates {
            self.push_child(id, ListRole::Templates, tp);
        }
        for param in parameters {
            self.push_child(id, ListRole::Parameters, param);
        }
        id
    }

    pub fn function_call(
        &mut self,
        name: impl Into<Name>,
        templates: Vec<NodeId>,
        arguments: Vec<NodeId>,
    ) -> NodeId {
        let id = self.alloc(NodeKind::FunctionCall {
            name: name.into(),
            binding: None,
            instance: None,
            templates: Vec::new(),
            arguments: Vec::new(),
        });
        for tp in templates {
            self.push_child(id, ListRole::Templates, tp);
        }
        for arg in arguments {
            self.push_child(id, ListRole::Arguments, arg);
        }
        id
    }

    pub fn param_assign(&mut self, name: Option<Name>, value: NodeId) -> NodeId {
        let id = self.alloc(NodeKind::ParamAssign { name, value: Some(value) });
        self[value].parent = Some(id);
        id
    }

    pub fn value_tp_assign(&mut self, name: Option<Name>, value: NodeId) -> NodeId {
        let id = self.alloc(NodeKind::ValueTpAssign { name, value: Some(value) });
        self[value].parent = Some(id);
        id
    }

    pub fn type_tp_assign(&mut self, name: Option<Name>, ty: NodeId) -> NodeId {
        let id = self.alloc(NodeKind::TypeTpAssign { name, ty: Some(ty) });
        self[ty].parent = Some(id);
        id
    }

    pub fn library_def(&mut self, name: impl Into<Name>, standard: bool) -> NodeId {
        self.alloc(NodeKind::LibraryDef {
            name: name.into(),
            standard,
            libraries: Vec::new(),
            declarations: Vec::new(),
        })
    }

    pub fn library(&mut self, name: impl Into<Name>, standard: bool) -> NodeId {
        self.alloc(NodeKind::Library { name: name.into(), binding: None, standard })
    }

    pub fn view(&mut self, name: impl Into<Name>) -> NodeId {
        self.alloc(NodeKind::View {
            name: name.into(),
            templates: Vec::new(),
            ports: Vec::new(),
            libraries: Vec::new(),
            declarations: Vec::new(),
        })
    }

    pub fn design_unit(&mut self, name: impl Into<Name>) -> NodeId {
        self.alloc(NodeKind::DesignUnit { name: name.into(), views: Vec::new() })
    }
}
