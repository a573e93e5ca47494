//! Monitor directive rendering
//!
//! A directive body is the part of a `monitor = ...` line after the connector
//! name: `<w>x<h>@<rate>, <x>x<y>, <scale>`. Two renderings exist for the
//! same placement:
//!
//! - the literal form freezes the computed coordinates as plain numbers, and
//! - the symbolic form keeps the position fields as POSIX-shell `$((...))`
//!   arithmetic over the anchor's reported position and native size, so the
//!   attachment can be replayed even if the anchor has moved by then.
//!
//! Shell arithmetic truncates integer division the same way the compositor
//! truncates logical sizes, so both forms resolve to identical coordinates.

use std::fmt;

use crate::geometry::RelativePosition;
use crate::monitor::MonitorAttributes;
use crate::scale::ScaleTenths;

/// Arithmetic expression rendered into shell `$((...))` syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Literal(i64),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn lit(value: i64) -> Self {
        Expr::Literal(value)
    }

    pub fn add(lhs: Expr, rhs: Expr) -> Self {
        Expr::Add(Box::new(lhs), Box::new(rhs))
    }

    pub fn sub(lhs: Expr, rhs: Expr) -> Self {
        Expr::Sub(Box::new(lhs), Box::new(rhs))
    }

    pub fn mul(lhs: Expr, rhs: Expr) -> Self {
        Expr::Mul(Box::new(lhs), Box::new(rhs))
    }

    pub fn div(lhs: Expr, rhs: Expr) -> Self {
        Expr::Div(Box::new(lhs), Box::new(rhs))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Expr::Literal(_))
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Literal(_) => 2,
            Expr::Mul(..) | Expr::Div(..) => 1,
            Expr::Add(..) | Expr::Sub(..) => 0,
        }
    }

    fn write(&self, out: &mut String) {
        let (lhs, op, rhs) = match self {
            Expr::Literal(value) => {
                out.push_str(&value.to_string());
                return;
            }
            Expr::Add(l, r) => (l, " + ", r),
            Expr::Sub(l, r) => (l, " - ", r),
            Expr::Mul(l, r) => (l, " * ", r),
            Expr::Div(l, r) => (l, " / ", r),
        };
        self.write_child(lhs, out, false);
        out.push_str(op);
        self.write_child(rhs, out, true);
    }

    fn write_child(&self, child: &Expr, out: &mut String, is_rhs: bool) {
        // Shell arithmetic is left-associative, so a right-hand child of the
        // same precedence needs parentheses under - and /.
        let needs_parens = child.precedence() < self.precedence()
            || (is_rhs
                && child.precedence() == self.precedence()
                && matches!(self, Expr::Sub(..) | Expr::Div(..)));
        if needs_parens {
            out.push('(');
            child.write(out);
            out.push(')');
        } else {
            child.write(out);
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write(&mut out);
        f.write_str(&out)
    }
}

/// `native / scale` as an integer-truncating shell expression.
///
/// Whole scales divide by the plain factor (`2560 / 2`); fractional scales
/// stay in tenths (`3840 * 10 / 24`) so no floating point ever appears in the
/// output. A 1.0x scale collapses to the bare value.
fn logical_expr(native: i32, scale: ScaleTenths) -> Expr {
    let tenths = scale.tenths();
    if scale.is_whole() {
        if tenths == 10 {
            Expr::lit(native as i64)
        } else {
            Expr::div(Expr::lit(native as i64), Expr::lit((tenths / 10) as i64))
        }
    } else {
        Expr::div(
            Expr::mul(Expr::lit(native as i64), Expr::lit(10)),
            Expr::lit(tenths as i64),
        )
    }
}

/// Append the perpendicular offset; zero offsets leave the base untouched.
fn with_offset(base: Expr, offset: i32) -> Expr {
    match offset {
        0 => base,
        o if o > 0 => Expr::add(base, Expr::lit(o as i64)),
        o => Expr::sub(base, Expr::lit(-(o as i64))),
    }
}

/// Position expressions for the new monitor, in terms of the anchor's
/// reported coordinates and native size.
pub fn symbolic_position(
    position: RelativePosition,
    current: &MonitorAttributes,
    new: &MonitorAttributes,
    offset: i32,
) -> (Expr, Expr) {
    let cx = Expr::lit(current.x as i64);
    let cy = Expr::lit(current.y as i64);
    match position {
        RelativePosition::Right => (
            Expr::add(cx, logical_expr(current.width, current.scale)),
            with_offset(cy, offset),
        ),
        RelativePosition::Left => (
            Expr::sub(cx, logical_expr(new.width, new.scale)),
            with_offset(cy, offset),
        ),
        RelativePosition::Below => (
            with_offset(cx, offset),
            Expr::add(cy, logical_expr(current.height, current.scale)),
        ),
        RelativePosition::Above => (
            with_offset(cx, offset),
            Expr::sub(cy, logical_expr(new.height, new.scale)),
        ),
    }
}

/// Frozen directive body with numeric coordinates.
pub fn literal_body(mon: &MonitorAttributes, x: i32, y: i32) -> String {
    format!(
        "{}x{}@{}, {}x{}, {}",
        mon.width, mon.height, mon.refresh_hz, x, y, mon.scale
    )
}

/// Directive body whose position fields re-derive the attachment from the
/// anchor at apply time.
pub fn symbolic_body(
    position: RelativePosition,
    current: &MonitorAttributes,
    new: &MonitorAttributes,
    offset: i32,
) -> String {
    let (x, y) = symbolic_position(position, current, new, offset);
    format!(
        "{}x{}@{}, {}x{}, {}",
        new.width,
        new.height,
        new.refresh_hz,
        position_field(&x),
        position_field(&y),
        new.scale
    )
}

/// Bare number for plain coordinates, `$((...))` once arithmetic is involved.
fn position_field(expr: &Expr) -> String {
    if expr.is_literal() {
        expr.to_string()
    } else {
        format!("$(({expr}))")
    }
}

/// Full directive as printed on confirmation: `<name>, <body>`.
pub fn directive_line(name: &str, body: &str) -> String {
    format!("{name}, {body}")
}

/// Runnable command applying one directive to the live compositor.
pub fn keyword_command(name: &str, body: &str) -> String {
    format!("hyprctl keyword monitor \"{name}, {body}\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::tests::test_monitor;

    fn laptop() -> MonitorAttributes {
        test_monitor("eDP-1", 2560, 1600, 180, 20, 0, 0, true)
    }

    fn tv() -> MonitorAttributes {
        test_monitor("HDMI-A-1", 3840, 2160, 120, 24, 0, 0, false)
    }

    #[test]
    fn test_expr_rendering_precedence() {
        let e = Expr::add(
            Expr::lit(0),
            Expr::div(Expr::mul(Expr::lit(3840), Expr::lit(10)), Expr::lit(24)),
        );
        assert_eq!(e.to_string(), "0 + 3840 * 10 / 24");

        let e = Expr::mul(Expr::add(Expr::lit(1), Expr::lit(2)), Expr::lit(3));
        assert_eq!(e.to_string(), "(1 + 2) * 3");

        let e = Expr::sub(Expr::lit(10), Expr::sub(Expr::lit(5), Expr::lit(2)));
        assert_eq!(e.to_string(), "10 - (5 - 2)");
    }

    #[test]
    fn test_literal_body_end_to_end() {
        let (x, y) =
            crate::geometry::compute_position(RelativePosition::Right, &laptop(), &tv(), 0);
        assert_eq!(literal_body(&tv(), x, y), "3840x2160@120, 1280x0, 2.4");
    }

    #[test]
    fn test_literal_body_for_anchor() {
        let mon = laptop();
        assert_eq!(literal_body(&mon, mon.x, mon.y), "2560x1600@180, 0x0, 2");
    }

    #[test]
    fn test_symbolic_right_whole_scale() {
        let body = symbolic_body(RelativePosition::Right, &laptop(), &tv(), 0);
        assert_eq!(body, "3840x2160@120, $((0 + 2560 / 2))x0, 2.4");
    }

    #[test]
    fn test_symbolic_left_fractional_scale() {
        // Left placement divides the new monitor's own width by its scale
        let body = symbolic_body(RelativePosition::Left, &laptop(), &tv(), 0);
        assert_eq!(body, "3840x2160@120, $((0 - 3840 * 10 / 24))x0, 2.4");
    }

    #[test]
    fn test_symbolic_offset_appended() {
        let body = symbolic_body(RelativePosition::Right, &laptop(), &tv(), 140);
        assert_eq!(body, "3840x2160@120, $((0 + 2560 / 2))x$((0 + 140)), 2.4");

        let body = symbolic_body(RelativePosition::Right, &laptop(), &tv(), -140);
        assert_eq!(body, "3840x2160@120, $((0 + 2560 / 2))x$((0 - 140)), 2.4");
    }

    #[test]
    fn test_symbolic_below_above() {
        let body = symbolic_body(RelativePosition::Below, &laptop(), &tv(), 320);
        assert_eq!(body, "3840x2160@120, $((0 + 320))x$((0 + 1600 / 2)), 2.4");

        let body = symbolic_body(RelativePosition::Above, &laptop(), &tv(), 0);
        assert_eq!(body, "3840x2160@120, 0x$((0 - 2160 * 10 / 24)), 2.4");
    }

    #[test]
    fn test_symbolic_unity_scale_collapses_division() {
        let mut anchor = laptop();
        anchor.scale = crate::scale::ScaleTenths::new(10).unwrap();
        let body = symbolic_body(RelativePosition::Right, &anchor, &tv(), 0);
        assert_eq!(body, "3840x2160@120, $((0 + 2560))x0, 2.4");
    }

    #[test]
    fn test_symbolic_reproducible() {
        let a = symbolic_body(RelativePosition::Above, &laptop(), &tv(), -77);
        let b = symbolic_body(RelativePosition::Above, &laptop(), &tv(), -77);
        assert_eq!(a, b);
    }

    #[test]
    fn test_symbolic_anchor_away_from_origin() {
        let mut anchor = laptop();
        anchor.x = 1920;
        anchor.y = 200;
        let body = symbolic_body(RelativePosition::Right, &anchor, &tv(), 0);
        assert_eq!(body, "3840x2160@120, $((1920 + 2560 / 2))x200, 2.4");
    }

    #[test]
    fn test_keyword_command_quotes_directive() {
        assert_eq!(
            keyword_command("eDP-1", "2560x1600@180, 0x0, 2"),
            "hyprctl keyword monitor \"eDP-1, 2560x1600@180, 0x0, 2\""
        );
    }
}
