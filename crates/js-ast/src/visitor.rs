use crate::ast::*;

/// Visitor trait for AST traversal. All methods have default implementations
/// that recursively walk child nodes, so implementors only need to override
/// the node types they care about.
pub trait Visitor {
    fn visit_program(&mut self, program: &Program) {
        walk_program(self, program);
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }

    fn visit_pattern(&mut self, pattern: &Pattern) {
        walk_pattern(self, pattern);
    }

    fn visit_function(&mut self, function: &Function) {
        walk_function(self, function);
    }

    fn visit_class(&mut self, class: &Class) {
        walk_class(self, class);
    }

    fn visit_class_member(&mut self, member: &ClassMember) {
        walk_class_member(self, member);
    }

    fn visit_property_key(&mut self, key: &PropertyKey) {
        walk_property_key(self, key);
    }

    /// Called for every private name, both declarations and `obj.#x` uses.
    fn visit_private_name(&mut self, _name: &PrivateName) {}
}

pub fn walk_program<V: Visitor + ?Sized>(visitor: &mut V, program: &Program) {
    for stmt in &program.body {
        visitor.visit_stmt(stmt);
    }
}

fn walk_var_decl<V: Visitor + ?Sized>(visitor: &mut V, decl: &VarDecl) {
    for declarator in &decl.declarations {
        if let Some(init) = &declarator.init {
            visitor.visit_expr(init);
        }
    }
}

pub fn walk_stmt<V: Visitor + ?Sized>(visitor: &mut V, stmt: &Stmt) {
    match &stmt.kind {
        StmtKind::Expression(expr) | StmtKind::Throw(expr) => {
            visitor.visit_expr(expr);
        }
        StmtKind::Var(decl) => walk_var_decl(visitor, decl),
        StmtKind::Function(func) => visitor.visit_function(func),
        StmtKind::Class(class) => visitor.visit_class(class),
        StmtKind::Return(expr) => {
            if let Some(expr) = expr {
                visitor.visit_expr(expr);
            }
        }
        StmtKind::If(if_stmt) => {
            visitor.visit_expr(&if_stmt.test);
            visitor.visit_stmt(&if_stmt.consequent);
            if let Some(alternate) = &if_stmt.alternate {
                visitor.visit_stmt(alternate);
            }
        }
        StmtKind::While(while_stmt) => {
            visitor.visit_expr(&while_stmt.test);
            visitor.visit_stmt(&while_stmt.body);
        }
        StmtKind::DoWhile(do_while) => {
            visitor.visit_stmt(&do_while.body);
            visitor.visit_expr(&do_while.test);
        }
        StmtKind::For(for_stmt) => {
            match &for_stmt.init {
                Some(ForInit::Var(decl)) => walk_var_decl(visitor, decl),
                Some(ForInit::Expr(expr)) => visitor.visit_expr(expr),
                None => {}
            }
            if let Some(test) = &for_stmt.test {
                visitor.visit_expr(test);
            }
            if let Some(update) = &for_stmt.update {
                visitor.visit_expr(update);
            }
            visitor.visit_stmt(&for_stmt.body);
        }
        StmtKind::Block(stmts) => {
            for stmt in stmts {
                visitor.visit_stmt(stmt);
            }
        }
        StmtKind::Break | StmtKind::Continue | StmtKind::Empty => {}
    }
}

pub fn walk_expr<V: Visitor + ?Sized>(visitor: &mut V, expr: &Expr) {
    match &expr.kind {
        ExprKind::Array(elements) => {
            for elem in elements.iter().flatten() {
                visitor.visit_expr(elem);
            }
        }
        ExprKind::Object(props) => {
            for prop in props {
                match &prop.kind {
                    PropertyKind::KeyValue { key, value } => {
                        visitor.visit_property_key(key);
                        visitor.visit_expr(value);
                    }
                    PropertyKind::Method { key, value, .. } => {
                        visitor.visit_property_key(key);
                        visitor.visit_function(value);
                    }
                    PropertyKind::Spread(expr) => visitor.visit_expr(expr),
                    PropertyKind::Shorthand(_) => {}
                }
            }
        }
        ExprKind::Function(func) => visitor.visit_function(func),
        ExprKind::Arrow(arrow) => {
            for param in &arrow.params {
                visitor.visit_pattern(param);
            }
            match &arrow.body {
                ArrowBody::Expression(body) => visitor.visit_expr(body),
                ArrowBody::Block(stmts) => {
                    for stmt in stmts {
                        visitor.visit_stmt(stmt);
                    }
                }
            }
        }
        ExprKind::Class(class) => visitor.visit_class(class),
        ExprKind::Unary(unary) => visitor.visit_expr(&unary.argument),
        ExprKind::Update(update) => visitor.visit_expr(&update.argument),
        ExprKind::Binary(binary) => {
            visitor.visit_expr(&binary.left);
            visitor.visit_expr(&binary.right);
        }
        ExprKind::Assign(assign) => {
            visitor.visit_expr(&assign.target);
            visitor.visit_expr(&assign.value);
        }
        ExprKind::Conditional(cond) => {
            visitor.visit_expr(&cond.test);
            visitor.visit_expr(&cond.consequent);
            visitor.visit_expr(&cond.alternate);
        }
        ExprKind::Call(call) | ExprKind::New(call) => {
            visitor.visit_expr(&call.callee);
            for arg in &call.args {
                visitor.visit_expr(arg);
            }
        }
        ExprKind::Member(member) => {
            visitor.visit_expr(&member.object);
            match &member.property {
                MemberProperty::PrivateName(name) => visitor.visit_private_name(name),
                MemberProperty::Computed(prop) => visitor.visit_expr(prop),
                MemberProperty::Identifier(_) => {}
            }
        }
        ExprKind::Sequence(exprs) => {
            for expr in exprs {
                visitor.visit_expr(expr);
            }
        }
        ExprKind::Spread(inner) | ExprKind::Await(inner) => visitor.visit_expr(inner),
        ExprKind::Yield { argument, .. } => {
            if let Some(argument) = argument {
                visitor.visit_expr(argument);
            }
        }
        ExprKind::Identifier(_)
        | ExprKind::Number(_)
        | ExprKind::String(_)
        | ExprKind::Bool(_)
        | ExprKind::Null
        | ExprKind::This
        | ExprKind::Super => {}
    }
}

pub fn walk_pattern<V: Visitor + ?Sized>(visitor: &mut V, pattern: &Pattern) {
    match &pattern.kind {
        PatternKind::Assign { target, default } => {
            visitor.visit_pattern(target);
            visitor.visit_expr(default);
        }
        PatternKind::Rest(inner) => visitor.visit_pattern(inner),
        PatternKind::Identifier(_) => {}
    }
}

pub fn walk_function<V: Visitor + ?Sized>(visitor: &mut V, function: &Function) {
    for param in &function.params {
        visitor.visit_pattern(param);
    }
    for stmt in &function.body {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_class<V: Visitor + ?Sized>(visitor: &mut V, class: &Class) {
    if let Some(super_class) = &class.super_class {
        visitor.visit_expr(super_class);
    }
    for member in &class.body {
        visitor.visit_class_member(member);
    }
}

pub fn walk_class_member<V: Visitor + ?Sized>(visitor: &mut V, member: &ClassMember) {
    match &member.kind {
        ClassMemberKind::Method(method) => {
            visitor.visit_property_key(&method.key);
            visitor.visit_function(&method.value);
        }
        ClassMemberKind::Field(field) => {
            visitor.visit_property_key(&field.key);
            if let Some(value) = &field.value {
                visitor.visit_expr(value);
            }
        }
    }
}

pub fn walk_property_key<V: Visitor + ?Sized>(visitor: &mut V, key: &PropertyKey) {
    match key {
        PropertyKey::PrivateName(name) => visitor.visit_private_name(name),
        PropertyKey::Computed(expr) => visitor.visit_expr(expr),
        PropertyKey::Identifier(_) | PropertyKey::String { .. } | PropertyKey::Number { .. } => {}
    }
}
