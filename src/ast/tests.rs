//! Unit tests for the syntax tree module.
//!
//! Covers node kinds and positions, the walker and `inspect`, the JSON
//! encoding and the source printer.

use crate::{parse, Position};

use super::{
    ast::{AstNode, Expr, Node, NodeKind, Stmt},
    printer::print_block,
    walk::{inspect, walk, walk_block, Visitor},
};

struct Recorder {
    events: Vec<String>,
}

impl<'ast> Visitor<'ast> for Recorder {
    fn visit(&mut self, node: Option<Node<'ast>>) -> Option<&mut dyn Visitor<'ast>> {
        match node {
            Some(node) => self.events.push(node.get_kind().to_string()),
            None => self.events.push(String::from("exit")),
        }
        Some(self)
    }
}

struct DepthRecorder {
    depth: usize,
    nodes: Vec<(NodeKind, usize)>,
}

impl<'ast> Visitor<'ast> for DepthRecorder {
    fn visit(&mut self, node: Option<Node<'ast>>) -> Option<&mut dyn Visitor<'ast>> {
        match node {
            Some(node) => {
                self.nodes.push((node.get_kind(), self.depth));
                self.depth += 1;
            }
            None => self.depth -= 1,
        }
        Some(self)
    }
}

struct Counter {
    count: usize,
}

impl<'ast> Visitor<'ast> for Counter {
    fn visit(&mut self, node: Option<Node<'ast>>) -> Option<&mut dyn Visitor<'ast>> {
        if node.is_some() {
            self.count += 1;
        }
        Some(self)
    }
}

/// Counts nodes outside function bodies itself and hands bodies to `inside`.
struct FunctionBodies {
    outside: usize,
    inside: Counter,
}

impl<'ast> Visitor<'ast> for FunctionBodies {
    fn visit(&mut self, node: Option<Node<'ast>>) -> Option<&mut dyn Visitor<'ast>> {
        match node {
            Some(Node::Expr(Expr::FuncDecl(_))) => Some(&mut self.inside),
            Some(_) => {
                self.outside += 1;
                Some(self)
            }
            None => Some(self),
        }
    }
}

struct SkipFunctions {
    kinds: Vec<NodeKind>,
}

impl<'ast> Visitor<'ast> for SkipFunctions {
    fn visit(&mut self, node: Option<Node<'ast>>) -> Option<&mut dyn Visitor<'ast>> {
        let node = node?;
        self.kinds.push(node.get_kind());
        if node.get_kind() == NodeKind::FuncDecl {
            None
        } else {
            Some(self)
        }
    }
}

#[test]
fn test_kinds_follow_variants() {
    let block = parse("x = 1\n;\n-- note\nf()", 1).unwrap();
    let kinds: Vec<NodeKind> = block.iter().map(|stmt| stmt.get_kind()).collect();

    assert_eq!(
        kinds,
        vec![NodeKind::Assign, NodeKind::Empty, NodeKind::Comment, NodeKind::FuncCall]
    );
}

#[test]
fn test_positions_are_line_and_column() {
    let block = parse("x = 1\n  y = 2", 5).unwrap();

    assert_eq!(block[0].get_position(), Position::new(5, 1));
    assert_eq!(block[1].get_position(), Position::new(6, 3));
}

#[test]
fn test_walk_visits_in_order_with_exits() {
    let block = parse("local x = a + 1", 1).unwrap();
    let mut recorder = Recorder { events: vec![] };
    walk_block(&mut recorder, &block);

    assert_eq!(
        recorder.events,
        vec![
            "Assign", "ConstIdent", "exit", "Operator", "ConstIdent", "exit", "ConstInt", "exit", "exit", "exit"
        ]
    );
}

#[test]
fn test_walk_call_order() {
    let block = parse("obj:method(1, 2)", 1).unwrap();
    let mut recorder = Recorder { events: vec![] };
    walk(&mut recorder, Node::Stmt(&block[0]));

    let entries: Vec<&str> = recorder
        .events
        .iter()
        .map(String::as_str)
        .filter(|event| *event != "exit")
        .collect();

    // receiver, method name, then the arguments
    assert_eq!(entries, vec!["FuncCall", "ConstIdent", "ConstString", "ConstInt", "ConstInt"]);
}

#[test]
fn test_walk_table_entries_key_then_value() {
    let block = parse("t = {1, a = true}", 1).unwrap();
    let mut recorder = Recorder { events: vec![] };
    walk(&mut recorder, Node::Stmt(&block[0]));

    let entries: Vec<&str> = recorder
        .events
        .iter()
        .map(String::as_str)
        .filter(|event| *event != "exit")
        .collect();

    assert_eq!(
        entries,
        vec!["Assign", "ConstIdent", "TableConstructor", "ConstInt", "ConstString", "ConstBool"]
    );
}

#[test]
fn test_walk_prunes_on_none() {
    let block = parse("f = function() return 1 end", 1).unwrap();
    let mut visitor = SkipFunctions { kinds: vec![] };
    walk_block(&mut visitor, &block);

    assert_eq!(visitor.kinds, vec![NodeKind::Assign, NodeKind::ConstIdent, NodeKind::FuncDecl]);
}

#[test]
fn test_walk_scoped_depth_returns_to_zero() {
    let block = parse("while a do if b then c() end end", 1).unwrap();
    let mut recorder = DepthRecorder { depth: 0, nodes: vec![] };
    walk_block(&mut recorder, &block);

    assert_eq!(recorder.depth, 0);
    assert_eq!(
        recorder.nodes,
        vec![
            (NodeKind::WhileLoop, 0),
            (NodeKind::ConstIdent, 1),
            (NodeKind::If, 1),
            (NodeKind::ConstIdent, 2),
            (NodeKind::FuncCall, 2),
            (NodeKind::ConstIdent, 3),
        ]
    );
}

#[test]
fn test_walk_switches_visitor_for_children() {
    let block = parse("local f = function(a) return a end\nprint(f)", 1).unwrap();
    let mut visitor = FunctionBodies {
        outside: 0,
        inside: Counter { count: 0 },
    };
    walk_block(&mut visitor, &block);

    assert_eq!(visitor.outside, 5);
    assert_eq!(visitor.inside.count, 2);
}

#[test]
fn test_inspect_matches_filtered_walk() {
    let source = "local function f(a)\n  local g = function() return a + 1 end\n  return g\nend\nprint(f(2), {x = function() end})";
    let block = parse(source, 1).unwrap();

    let mut inspected = vec![];
    for stmt in &block {
        inspect(Node::Stmt(stmt), |node| match node {
            Some(node) => {
                inspected.push(node.get_kind());
                node.get_kind() != NodeKind::FuncDecl
            }
            None => true,
        });
    }

    let mut recorder = DepthRecorder { depth: 0, nodes: vec![] };
    walk_block(&mut recorder, &block);

    let mut filtered = vec![];
    let mut pruned_at = None;
    for (kind, depth) in recorder.nodes {
        if let Some(pruned) = pruned_at {
            if depth > pruned {
                continue;
            }
            pruned_at = None;
        }
        filtered.push(kind);
        if kind == NodeKind::FuncDecl {
            pruned_at = Some(depth);
        }
    }

    assert_eq!(inspected, filtered);
    assert!(inspected.contains(&NodeKind::FuncDecl));
    assert!(!inspected.contains(&NodeKind::Return));
}

#[test]
fn test_inspect_calls_root_even_when_pruning() {
    let block = parse("x = 1", 1).unwrap();
    let mut calls = 0;
    inspect(Node::Stmt(&block[0]), |_| {
        calls += 1;
        false
    });

    assert_eq!(calls, 1);
}

#[test]
fn test_json_is_tagged_with_kind() {
    let block = parse("local x = t.y", 1).unwrap();
    let json = serde_json::to_value(&block[0]).unwrap();

    assert_eq!(json["kind"], "Assign");
    assert_eq!(json["local_decl"], true);
    assert_eq!(json["targets"][0]["kind"], "ConstIdent");
    assert_eq!(json["values"][0]["kind"], "TableAccessor");
    assert_eq!(json["values"][0]["key"]["value"], "y");

    let decoded: Stmt = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, block[0]);
}

#[test]
fn test_print_if_chain() {
    let block = parse("if a then b() elseif c then d() else e() end", 1).unwrap();

    assert_eq!(
        print_block(&block),
        "if a then\n  b()\nelseif c then\n  d()\nelse\n  e()\nend\n"
    );
}

#[test]
fn test_print_function_sugar() {
    let block = parse("function t:m(x) return x end\nlocal function f(...) end", 1).unwrap();

    assert_eq!(
        print_block(&block),
        "function t:m(x)\n  return x\nend\nlocal function f(...)\nend\n"
    );
}

#[test]
fn test_print_function_assignments() {
    let block = parse("a.b = function(self) end\nt[1] = function() end\nlocal g = function() end", 1).unwrap();

    assert_eq!(
        print_block(&block),
        "function a:b()\nend\nt[1] = function()\nend\nlocal g = function()\nend\n"
    );
}

#[test]
fn test_print_loops_and_jumps() {
    let block = parse("for i=1,10 do break end\nfor k, v in pairs(t) do continue end\nrepeat goto done until x\n::done::", 1)
        .unwrap();

    assert_eq!(
        print_block(&block),
        "for i = 1, 10, 1 do\n  break\nend\nfor k, v in pairs(t) do\n  continue\nend\nrepeat\n  goto done\nuntil x\n::done::\n"
    );
}

#[test]
fn test_print_expressions() {
    let block = parse("x = -a .. #b\ny = not (c or d)\nt = {1, a = 2, [\"b c\"] = 3, [k] = 4}\nz = s.name[1]", 1)
        .unwrap();

    assert_eq!(
        print_block(&block),
        "x = - a .. # b\ny = not (c or d)\nt = {1, a = 2, [\"b c\"] = 3, [k] = 4}\nz = s.name[1]\n"
    );
}

#[test]
fn test_print_keeps_string_lexemes() {
    let block = parse("x = 'a\\n\"b\\\\\\0', \"\\xff\\200\", [==[\nraw]]==]", 1).unwrap();

    assert_eq!(print_block(&block), "x = 'a\\n\"b\\\\\\0', \"\\xff\\200\", [==[\nraw]]==]\n");
}

#[test]
fn test_print_spaces_long_string_keys() {
    let block = parse("t[ [[k]] ] = {[ [=[v]=] ] = 1, [\"w\"] = 2}", 1).unwrap();

    assert_eq!(print_block(&block), "t[ [[k]]] = {[ [=[v]=]] = 1, [\"w\"] = 2}\n");
}

#[test]
fn test_print_quotes_bare_string_values() {
    let block = parse("x = t.name", 1).unwrap();
    let Stmt::Assign(assign) = &block[0] else {
        panic!("expected an assignment");
    };
    let Expr::TableAccessor(accessor) = &assign.values[0] else {
        panic!("expected an accessor");
    };

    assert_eq!(accessor.key.to_string(), "\"name\"");
}

#[test]
fn test_print_comments() {
    let block = parse("-- short\n--[==[long\n]]text]==]", 1).unwrap();

    assert_eq!(print_block(&block), "-- short\n--[=[long\n]]text]=]\n");
}
