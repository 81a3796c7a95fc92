// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recoloring of the detached target copy.
//!
//! The copy is any tree of [`VisualNode`]s. [`recolor_copy`] applies the
//! configured tint: it always propagates the native tint property through the
//! whole tree, and when recoloring is enabled it also rewrites the colors of
//! the common control shapes (button, image, icon with caption, label).

use peniko::Color;

/// What kind of visual a node is, as far as recoloring cares.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeRole {
    /// A button with an optional icon and title.
    Button,
    /// An image.
    Image,
    /// A text label.
    Label,
    /// Anything else.
    Other,
}

/// A node of a detached visual tree.
pub trait VisualNode {
    /// Role of this node.
    fn role(&self) -> NodeRole;

    /// Number of direct children.
    fn child_count(&self) -> usize;

    /// Mutable access to the `index`-th child.
    fn child_mut(&mut self, index: usize) -> Option<&mut Self>;

    /// Role of the `index`-th child.
    fn child_role(&self, index: usize) -> Option<NodeRole>;

    /// Sets the native tint property of this node only.
    fn set_tint(&mut self, color: Color);

    /// Sets the text color of a label, or the normal-state title color of a button.
    fn set_text_color(&mut self, color: Color);

    /// Switches the node's image (or a button's icon) to template rendering
    /// filled with `color`.
    fn set_template_image(&mut self, color: Color);

    /// Enables or disables a control.
    fn set_enabled(&mut self, _enabled: bool) {}
}

/// Sets the tint of `node` and every descendant.
pub fn apply_tint_recursive<N: VisualNode>(node: &mut N, color: Color) {
    node.set_tint(color);
    for index in 0..node.child_count() {
        if let Some(child) = node.child_mut(index) {
            apply_tint_recursive(child, color);
        }
    }
}

/// Which recoloring rule matched in [`recolor_copy`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RecolorRule {
    /// Recoloring disabled; only the tint was propagated.
    TintOnly,
    /// Button icon and title.
    Button,
    /// Template image.
    Image,
    /// Leading icon with trailing caption.
    IconWithCaption,
    /// Label text.
    Label,
    /// No special case applied beyond the tint.
    Unmatched,
}

/// Recolors a target copy with `tint`.
///
/// With `recolor` set, the first matching rule applies:
/// 1. a button gets a template icon, a tinted title, and is force-enabled;
/// 2. an image switches to template rendering;
/// 3. a node whose first child is an image and last child a label gets both
///    recolored;
/// 4. a label gets its text recolored.
pub fn recolor_copy<N: VisualNode>(copy: &mut N, tint: Color, recolor: bool) -> RecolorRule {
    apply_tint_recursive(copy, tint);
    if !recolor {
        return RecolorRule::TintOnly;
    }
    match copy.role() {
        NodeRole::Button => {
            copy.set_template_image(tint);
            copy.set_text_color(tint);
            copy.set_enabled(true);
            RecolorRule::Button
        }
        NodeRole::Image => {
            copy.set_template_image(tint);
            RecolorRule::Image
        }
        _ if is_icon_with_caption(copy) => {
            let last = copy.child_count() - 1;
            if let Some(icon) = copy.child_mut(0) {
                icon.set_template_image(tint);
            }
            if let Some(caption) = copy.child_mut(last) {
                caption.set_text_color(tint);
            }
            RecolorRule::IconWithCaption
        }
        NodeRole::Label => {
            copy.set_text_color(tint);
            RecolorRule::Label
        }
        NodeRole::Other => RecolorRule::Unmatched,
    }
}

fn is_icon_with_caption<N: VisualNode>(node: &N) -> bool {
    let count = node.child_count();
    count >= 2
        && node.child_role(0) == Some(NodeRole::Image)
        && node.child_role(count - 1) == Some(NodeRole::Label)
}
