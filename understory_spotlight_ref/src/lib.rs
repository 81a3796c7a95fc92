// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_spotlight_ref --heading-base-level=0

//! Understory Spotlight Reference Host.
//!
//! This crate provides [`RefHost`], a small in-memory implementation of every
//! host trait of `understory_spotlight`, for **tests and debugging**:
//! - It keeps an element arena with frames, roles, tints and surfaces.
//! - It does **not** render or animate. Presented scenes are stored per
//!   surface, and started tweens stay pending until a test finishes them.
//! - Every host-visible call is appended to an [`HostEvent`] log.
//!
//! Text is measured with fixed metrics: every character advances
//! [`CHAR_ADVANCE`] × font size, lines are [`LINE_HEIGHT`] × font size tall,
//! and wrapping is greedy per character.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size, Vec2};
use peniko::Color;
use understory_spotlight::animation::{Tween, TweenDriver, TweenId};
use understory_spotlight::color::StatusBarStyle;
use understory_spotlight::host::{
    ElementHost, OverlayHost, SurfaceMetrics, TextMeasurer, TextRequest,
};
use understory_spotlight::scene::OverlayScene;
use understory_spotlight::tint::{NodeRole, VisualNode};

/// Character advance as a fraction of the font size.
pub const CHAR_ADVANCE: f64 = 0.5;
/// Line height as a multiple of the font size.
pub const LINE_HEIGHT: f64 = 1.2;

/// Handle to an element of a [`RefHost`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RefElement(pub u32);

impl RefElement {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct ElementData {
    parent: Option<RefElement>,
    children: Vec<RefElement>,
    frame: Rect,
    role: NodeRole,
    interactive: bool,
    tint: Option<Color>,
    foreground: Option<Color>,
    surface: Option<SurfaceMetrics>,
    cells: Vec<((usize, usize), RefElement)>,
    bar_view: Option<RefElement>,
}

impl ElementData {
    fn new(parent: Option<RefElement>, frame: Rect, role: NodeRole) -> Self {
        Self {
            parent,
            children: Vec::new(),
            frame,
            role,
            interactive: role != NodeRole::Label,
            tint: None,
            foreground: None,
            surface: None,
            cells: Vec::new(),
            bar_view: None,
        }
    }
}

/// Detached copy of a [`RefHost`] element subtree.
#[derive(Clone, Debug, PartialEq)]
pub struct RefNode {
    /// Element the copy was taken from.
    pub source: RefElement,
    /// Role of the source element.
    pub role: NodeRole,
    /// Copies of the source's children.
    pub children: Vec<Self>,
    /// Tint set on the copy.
    pub tint: Option<Color>,
    /// Text or title color set on the copy.
    pub text_color: Option<Color>,
    /// Template image fill set on the copy.
    pub template_image: Option<Color>,
    /// Enabled state forced on the copy.
    pub enabled: Option<bool>,
}

impl VisualNode for RefNode {
    fn role(&self) -> NodeRole {
        self.role
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child_mut(&mut self, index: usize) -> Option<&mut Self> {
        self.children.get_mut(index)
    }

    fn child_role(&self, index: usize) -> Option<NodeRole> {
        self.children.get(index).map(|c| c.role)
    }

    fn set_tint(&mut self, color: Color) {
        self.tint = Some(color);
    }

    fn set_text_color(&mut self, color: Color) {
        self.text_color = Some(color);
    }

    fn set_template_image(&mut self, color: Color) {
        self.template_image = Some(color);
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = Some(enabled);
    }
}

/// A host-visible call recorded by [`RefHost`].
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    /// A scene was presented on a surface.
    Present(RefElement),
    /// A surface's overlay was detached.
    Detach(RefElement),
    /// A tween was started.
    TweenStarted(TweenId),
    /// A tween was cancelled while pending.
    TweenCancelled(TweenId),
    /// The status bar style was requested.
    StatusBar(StatusBarStyle),
}

/// In-memory host for tests.
#[derive(Clone, Debug, Default)]
pub struct RefHost {
    elements: Vec<ElementData>,
    key_surface: Option<RefElement>,
    status_bar: StatusBarStyle,
    overlays: Vec<(RefElement, OverlayScene<RefNode>)>,
    pending: Vec<(TweenId, Tween)>,
    next_tween: u64,
    log: Vec<HostEvent>,
}

impl RefHost {
    /// An empty host.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, data: ElementData) -> RefElement {
        let id = RefElement(u32::try_from(self.elements.len()).unwrap_or(u32::MAX));
        self.elements.push(data);
        id
    }

    fn data(&self, element: RefElement) -> Option<&ElementData> {
        self.elements.get(element.index())
    }

    fn data_mut(&mut self, element: RefElement) -> Option<&mut ElementData> {
        self.elements.get_mut(element.index())
    }

    /// Adds a top-level surface filling `bounds`, with no safe area.
    ///
    /// The first surface added becomes the key surface.
    pub fn add_surface(&mut self, bounds: Rect) -> RefElement {
        let mut data = ElementData::new(None, bounds, NodeRole::Other);
        let local = Rect::from_origin_size(Point::ZERO, bounds.size());
        data.surface = Some(SurfaceMetrics::full_screen(local));
        let id = self.push(data);
        self.key_surface.get_or_insert(id);
        id
    }

    /// Adds an element under `parent` with `frame` in the parent's space.
    pub fn add_element(&mut self, parent: RefElement, frame: Rect, role: NodeRole) -> RefElement {
        let id = self.push(ElementData::new(Some(parent), frame, role));
        if let Some(p) = self.data_mut(parent) {
            p.children.push(id);
        }
        id
    }

    /// Adds an element that belongs to no surface.
    pub fn add_detached(&mut self, frame: Rect, role: NodeRole) -> RefElement {
        self.push(ElementData::new(None, frame, role))
    }

    /// Removes `element` from its parent, leaving it detached.
    pub fn remove_from_parent(&mut self, element: RefElement) {
        let Some(parent) = self.data_mut(element).and_then(|d| d.parent.take()) else {
            return;
        };
        if let Some(p) = self.data_mut(parent) {
            p.children.retain(|c| *c != element);
        }
    }

    /// Replaces a surface's metrics.
    pub fn set_surface_metrics(&mut self, surface: RefElement, metrics: SurfaceMetrics) {
        if let Some(d) = self.data_mut(surface) {
            d.surface = Some(metrics);
        }
    }

    /// Sets the surface used for showcases without a target.
    pub fn set_key_surface(&mut self, surface: Option<RefElement>) {
        self.key_surface = surface;
    }

    /// Moves or resizes an element.
    pub fn set_frame(&mut self, element: RefElement, frame: Rect) {
        if let Some(d) = self.data_mut(element) {
            d.frame = frame;
        }
    }

    /// Sets whether an element accepts interaction.
    pub fn set_interactive(&mut self, element: RefElement, interactive: bool) {
        if let Some(d) = self.data_mut(element) {
            d.interactive = interactive;
        }
    }

    /// Sets an element's own tint; descendants without one inherit it.
    pub fn set_tint(&mut self, element: RefElement, tint: Color) {
        if let Some(d) = self.data_mut(element) {
            d.tint = Some(tint);
        }
    }

    /// Sets a label's text color or a button's title color.
    pub fn set_foreground(&mut self, element: RefElement, color: Color) {
        if let Some(d) = self.data_mut(element) {
            d.foreground = Some(color);
        }
    }

    /// Registers `content` as the loaded cell content at `section`/`row`.
    pub fn set_table_cell(
        &mut self,
        table: RefElement,
        section: usize,
        row: usize,
        content: RefElement,
    ) {
        if let Some(d) = self.data_mut(table) {
            d.cells.retain(|(key, _)| *key != (section, row));
            d.cells.push(((section, row), content));
        }
    }

    /// Realizes a bar button item with `view`.
    pub fn set_bar_item_view(&mut self, item: RefElement, view: RefElement) {
        if let Some(d) = self.data_mut(item) {
            d.bar_view = Some(view);
        }
    }

    /// The scene presented on `surface`, if an overlay is attached.
    pub fn attached(&self, surface: RefElement) -> Option<&OverlayScene<RefNode>> {
        self.overlays
            .iter()
            .find(|(s, _)| *s == surface)
            .map(|(_, scene)| scene)
    }

    /// Number of surfaces with an overlay attached.
    pub fn attached_count(&self) -> usize {
        self.overlays.len()
    }

    /// Tweens started and neither finished nor cancelled, oldest first.
    pub fn pending_tweens(&self) -> &[(TweenId, Tween)] {
        &self.pending
    }

    /// Removes the newest pending tween, as if it had run to its end, and
    /// returns its id.
    pub fn finish_last_tween(&mut self) -> Option<TweenId> {
        self.pending.pop().map(|(id, _)| id)
    }

    /// Removes a pending tween. Returns whether it was pending.
    pub fn finish_tween(&mut self, id: TweenId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(pending, _)| *pending != id);
        self.pending.len() != before
    }

    /// Current status bar style.
    pub fn current_status_bar(&self) -> StatusBarStyle {
        self.status_bar
    }

    /// Every recorded call, oldest first.
    pub fn events(&self) -> &[HostEvent] {
        &self.log
    }

    /// Forgets the recorded calls.
    pub fn clear_events(&mut self) {
        self.log.clear();
    }

    fn copy_of(&self, element: RefElement) -> Option<RefNode> {
        let data = self.data(element)?;
        Some(RefNode {
            source: element,
            role: data.role,
            children: data
                .children
                .iter()
                .filter_map(|c| self.copy_of(*c))
                .collect(),
            tint: None,
            text_color: None,
            template_image: None,
            enabled: None,
        })
    }
}

impl ElementHost for RefHost {
    type Element = RefElement;

    fn surface_of(&self, element: &RefElement) -> Option<RefElement> {
        let mut current = *element;
        loop {
            let data = self.data(current)?;
            match data.parent {
                Some(parent) => current = parent,
                None => return data.surface.map(|_| current),
            }
        }
    }

    fn key_surface(&self) -> Option<RefElement> {
        self.key_surface
    }

    fn surface_metrics(&self, surface: &RefElement) -> SurfaceMetrics {
        self.data(*surface)
            .and_then(|d| d.surface)
            .unwrap_or_else(|| SurfaceMetrics::full_screen(Rect::ZERO))
    }

    fn bounds_in(&self, element: &RefElement, ancestor: &RefElement) -> Rect {
        let Some(data) = self.data(*element) else {
            return Rect::ZERO;
        };
        let mut offset = Vec2::ZERO;
        let mut parent = data.parent;
        while let Some(p) = parent {
            if p == *ancestor {
                break;
            }
            let Some(pd) = self.data(p) else {
                break;
            };
            offset += pd.frame.origin().to_vec2();
            parent = pd.parent;
        }
        data.frame + offset
    }

    fn frame(&self, element: &RefElement) -> Rect {
        self.data(*element).map_or(Rect::ZERO, |d| d.frame)
    }

    fn children(&self, element: &RefElement) -> Vec<RefElement> {
        self.data(*element)
            .map(|d| d.children.clone())
            .unwrap_or_default()
    }

    fn is_interactive(&self, element: &RefElement) -> bool {
        self.data(*element).is_some_and(|d| d.interactive)
    }

    fn tint_color(&self, element: &RefElement) -> Option<Color> {
        let mut current = Some(*element);
        while let Some(e) = current {
            let data = self.data(e)?;
            if data.tint.is_some() {
                return data.tint;
            }
            current = data.parent;
        }
        None
    }

    fn text_color(&self, element: &RefElement) -> Option<Color> {
        self.data(*element)
            .filter(|d| d.role == NodeRole::Label)
            .and_then(|d| d.foreground)
    }

    fn title_color(&self, element: &RefElement) -> Option<Color> {
        self.data(*element)
            .filter(|d| d.role == NodeRole::Button)
            .and_then(|d| d.foreground)
    }

    fn table_cell_content(
        &self,
        table: &RefElement,
        section: usize,
        row: usize,
    ) -> Option<RefElement> {
        self.data(*table)?
            .cells
            .iter()
            .find(|(key, _)| *key == (section, row))
            .map(|(_, content)| *content)
    }

    fn bar_item_view(&self, item: &RefElement) -> Option<RefElement> {
        self.data(*item)?.bar_view
    }
}

impl OverlayHost for RefHost {
    type Snapshot = RefNode;

    fn snapshot(&mut self, element: &RefElement) -> Option<RefNode> {
        self.copy_of(*element)
    }

    fn present(&mut self, surface: &RefElement, scene: &OverlayScene<RefNode>) {
        match self.overlays.iter_mut().find(|(s, _)| s == surface) {
            Some((_, current)) => *current = scene.clone(),
            None => self.overlays.push((*surface, scene.clone())),
        }
        self.log.push(HostEvent::Present(*surface));
    }

    fn detach(&mut self, surface: &RefElement) {
        self.overlays.retain(|(s, _)| s != surface);
        self.log.push(HostEvent::Detach(*surface));
    }

    fn status_bar_style(&self) -> StatusBarStyle {
        self.status_bar
    }

    fn set_status_bar_style(&mut self, style: StatusBarStyle, _animated: bool) {
        self.status_bar = style;
        self.log.push(HostEvent::StatusBar(style));
    }
}

impl TextMeasurer for RefHost {
    fn measure(&self, request: &TextRequest<'_>) -> Size {
        let advance = request.font.size * CHAR_ADVANCE;
        let mut lines: u32 = 0;
        let mut line_width = 0.0_f64;
        let mut widest = 0.0_f64;
        for ch in request.text.chars() {
            if lines == 0 {
                lines = 1;
            }
            if ch == '\n' {
                widest = widest.max(line_width);
                line_width = 0.0;
                lines += 1;
                continue;
            }
            if let Some(max) = request.max_width
                && line_width > 0.0
                && line_width + advance > max
            {
                widest = widest.max(line_width);
                line_width = 0.0;
                lines += 1;
            }
            line_width += advance;
        }
        widest = widest.max(line_width);
        if let Some(max_lines) = request.max_lines {
            lines = lines.min(max_lines);
        }
        Size::new(widest, f64::from(lines) * request.font.size * LINE_HEIGHT)
    }
}

impl TweenDriver for RefHost {
    fn start_tween(&mut self, tween: Tween) -> TweenId {
        self.next_tween += 1;
        let id = TweenId(self.next_tween);
        self.pending.push((id, tween));
        self.log.push(HostEvent::TweenStarted(id));
        id
    }

    fn cancel_tween(&mut self, id: TweenId) {
        if self.finish_tween(id) {
            self.log.push(HostEvent::TweenCancelled(id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use understory_spotlight::animation::Easing;
    use understory_spotlight::config::FontDesc;

    fn measure(
        host: &RefHost,
        text: &str,
        max_width: Option<f64>,
        max_lines: Option<u32>,
    ) -> Size {
        host.measure(&TextRequest {
            text,
            font: &FontDesc::system(10.0),
            max_width,
            max_lines,
        })
    }

    #[test]
    fn measures_with_greedy_wrap() {
        let host = RefHost::new();
        assert_eq!(measure(&host, "", None, None), Size::ZERO);
        assert_eq!(measure(&host, "abcd", None, None), Size::new(20.0, 12.0));
        // Two characters fit per 10pt line.
        let wrapped = measure(&host, "abcde", Some(10.0), None);
        assert_eq!(wrapped, Size::new(10.0, 36.0));
        assert_eq!(measure(&host, "abcde", Some(10.0), Some(2)).height, 24.0);
        assert_eq!(measure(&host, "ab\nc", None, None).height, 24.0);
    }

    #[test]
    fn bounds_accumulate_up_to_ancestor() {
        let mut host = RefHost::new();
        let window = host.add_surface(Rect::new(0.0, 0.0, 400.0, 800.0));
        let bar_frame = Rect::new(0.0, 700.0, 400.0, 800.0);
        let bar = host.add_element(window, bar_frame, NodeRole::Other);
        let item_frame = Rect::new(100.0, 10.0, 140.0, 50.0);
        let item = host.add_element(bar, item_frame, NodeRole::Button);
        assert_eq!(host.bounds_in(&item, &bar), item_frame);
        let in_window = host.bounds_in(&item, &window);
        assert_eq!(in_window, Rect::new(100.0, 710.0, 140.0, 750.0));
        assert_eq!(host.surface_of(&item), Some(window));
    }

    #[test]
    fn detached_elements_have_no_surface() {
        let mut host = RefHost::new();
        let window = host.add_surface(Rect::new(0.0, 0.0, 100.0, 100.0));
        let loose = host.add_detached(Rect::new(0.0, 0.0, 10.0, 10.0), NodeRole::Image);
        assert_eq!(host.surface_of(&loose), None);
        let child = host.add_element(window, Rect::new(0.0, 0.0, 10.0, 10.0), NodeRole::Image);
        host.remove_from_parent(child);
        assert_eq!(host.surface_of(&child), None);
        assert!(host.children(&window).is_empty());
    }

    #[test]
    fn tint_is_inherited() {
        let mut host = RefHost::new();
        let window = host.add_surface(Rect::new(0.0, 0.0, 100.0, 100.0));
        let group = host.add_element(window, Rect::new(0.0, 0.0, 50.0, 50.0), NodeRole::Other);
        let leaf = host.add_element(group, Rect::new(0.0, 0.0, 10.0, 10.0), NodeRole::Image);
        assert_eq!(host.tint_color(&leaf), None);
        host.set_tint(window, Color::BLACK);
        assert_eq!(host.tint_color(&leaf), Some(Color::BLACK));
        host.set_tint(group, Color::WHITE);
        assert_eq!(host.tint_color(&leaf), Some(Color::WHITE));
    }

    #[test]
    fn cancelling_only_logs_pending_tweens() {
        let mut host = RefHost::new();
        let id = host.start_tween(Tween::single(1.0, Easing::Linear, Vec::new()));
        assert_eq!(host.finish_last_tween(), Some(id));
        host.cancel_tween(id);
        assert_eq!(host.events(), &[HostEvent::TweenStarted(id)]);
    }

    #[test]
    fn snapshot_mirrors_subtree() {
        let mut host = RefHost::new();
        let window = host.add_surface(Rect::new(0.0, 0.0, 100.0, 100.0));
        let item = host.add_element(window, Rect::new(0.0, 0.0, 40.0, 40.0), NodeRole::Other);
        host.add_element(item, Rect::new(0.0, 0.0, 20.0, 20.0), NodeRole::Image);
        host.add_element(item, Rect::new(0.0, 20.0, 40.0, 40.0), NodeRole::Label);
        let copy = host.snapshot(&item).unwrap();
        assert_eq!(copy.source, item);
        assert_eq!(copy.child_role(0), Some(NodeRole::Image));
        assert_eq!(copy.child_role(1), Some(NodeRole::Label));
    }
}
