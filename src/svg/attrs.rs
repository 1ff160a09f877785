// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Closed attribute records of the supported elements.
//!
//! Every known attribute is always present in a record as an `Option`.
//! Records share the core, style and presentation groups by composition.

use super::claims::AttrClaims;
use super::use_box::VirtualCache;
use super::{AttrValue, Style};
use crate::types::*;
use crate::{Accept, FixPrecision, ValueError};

/// Shared behavior of the attribute records.
pub trait AttrRecord: Sized {
    /// Claims all record attributes.
    ///
    /// Group records are claimed first.
    fn claim(claims: &mut AttrClaims) -> Self;

    /// Appends all set attributes, groups first, in the record order.
    fn collect(&self, out: &mut Vec<(&'static str, AttrValue)>);

    /// Parses and stores an attribute by its name.
    ///
    /// Returns `None` when the record doesn't have such attribute.
    fn assign(&mut self, name: &str, raw: &str) -> Option<Result<(), ValueError>>;

    /// Unsets an attribute by its name.
    ///
    /// Returns `false` when the record doesn't have such attribute.
    fn clear(&mut self, name: &str) -> bool;

    /// Copies all set attributes of `other` over the current ones.
    fn overlay(&mut self, other: &Self);
}

macro_rules! attr_record {
    (
        $(#[$meta:meta])*
        $name:ident {
            $(@$group:ident: $group_ty:ty,)*
            $($field:ident: $ty:ty = $attr:literal,)*
            $(; $($extra:ident: $extra_ty:ty,)*)?
        }
    ) => (
        $(#[$meta])*
        #[derive(Clone, PartialEq, Default, Debug)]
        #[allow(missing_docs)]
        pub struct $name {
            $(pub $group: $group_ty,)*
            $(pub $field: Option<$ty>,)*
            $($(pub $extra: $extra_ty,)*)?
        }

        impl $name {
            /// Names of the record's own attributes, groups excluded.
            pub const NAMES: &'static [&'static str] = &[$($attr),*];
        }

        impl AttrRecord for $name {
            fn claim(claims: &mut AttrClaims) -> Self {
                $name {
                    $($group: <$group_ty as AttrRecord>::claim(claims),)*
                    $($field: claims.claim($attr),)*
                    $($($extra: Default::default(),)*)?
                }
            }

            fn collect(&self, out: &mut Vec<(&'static str, AttrValue)>) {
                $(self.$group.collect(out);)*
                $(
                    if let Some(ref v) = self.$field {
                        out.push(($attr, AttrValue::from(v.clone())));
                    }
                )*
            }

            #[allow(unused_variables)]
            fn assign(&mut self, name: &str, raw: &str) -> Option<Result<(), ValueError>> {
                $(
                    if let Some(res) = self.$group.assign(name, raw) {
                        return Some(res);
                    }
                )*

                match name {
                    $($attr => Some(<$ty as Accept>::accept(raw, name).map(|v| self.$field = Some(v))),)*
                    _ => None,
                }
            }

            fn clear(&mut self, name: &str) -> bool {
                $(
                    if self.$group.clear(name) {
                        return true;
                    }
                )*

                match name {
                    $($attr => { self.$field = None; true })*
                    _ => false,
                }
            }

            #[allow(unused_variables)]
            fn overlay(&mut self, other: &Self) {
                $(self.$group.overlay(&other.$group);)*
                $(
                    if other.$field.is_some() {
                        self.$field = other.$field.clone();
                    }
                )*
            }
        }

        impl FixPrecision for $name {
            #[allow(unused_variables)]
            fn fix_precision(&self, digits: u8) -> Self {
                $name {
                    $($group: self.$group.fix_precision(digits),)*
                    $($field: self.$field.as_ref().map(|v| v.fix_precision(digits)),)*
                    $($($extra: self.$extra.clone(),)*)?
                }
            }
        }
    )
}

attr_record!(
    /// The `id` attribute.
    CoreAttrs {
        id: String = "id",
    }
);

attr_record!(
    /// The `class` and `style` attributes.
    StyleAttrs {
        class: ClassList = "class",
        style: Style = "style",
    }
);

attr_record!(
    /// Presentation attributes.
    ///
    /// Also used as the body of the inline `style` attribute.
    PresentationAttrs {
        fill: Paint = "fill",
        fill_rule: FillRule = "fill-rule",
        stroke: Paint = "stroke",
        stroke_width: Length = "stroke-width",
        stroke_linecap: LineCap = "stroke-linecap",
        stroke_linejoin: LineJoin = "stroke-linejoin",
        stroke_dasharray: Dasharray = "stroke-dasharray",
        opacity: Ratio = "opacity",
        transform: Transform = "transform",
        font_family: FontFamily = "font-family",
        font_size: FontSize = "font-size",
        font_style: FontStyle = "font-style",
        font_weight: FontWeight = "font-weight",
    }
);

impl PresentationAttrs {
    /// Returns a copy of values that are passed to child elements.
    ///
    /// `transform` and `opacity` are not inherited.
    pub fn inheritable(&self) -> PresentationAttrs {
        PresentationAttrs {
            transform: None,
            opacity: None,
            ..self.clone()
        }
    }
}

attr_record!(
    SvgAttrs {
        @core: CoreAttrs,
        @style: StyleAttrs,
        @presentation: PresentationAttrs,
        xmlns: String = "xmlns",
        xmlns_xlink: String = "xmlns:xlink",
        version: String = "version",
        x: Length = "x",
        y: Length = "y",
        width: Length = "width",
        height: Length = "height",
        view_box: ViewBox = "viewBox",
        preserve_aspect_ratio: String = "preserveAspectRatio",
    }
);

attr_record!(
    CircleAttrs {
        @core: CoreAttrs,
        @style: StyleAttrs,
        @presentation: PresentationAttrs,
        cx: Length = "cx",
        cy: Length = "cy",
        r: Length = "r",
    }
);

attr_record!(
    RectAttrs {
        @core: CoreAttrs,
        @style: StyleAttrs,
        @presentation: PresentationAttrs,
        x: Length = "x",
        y: Length = "y",
        width: Length = "width",
        height: Length = "height",
        rx: Length = "rx",
        ry: Length = "ry",
    }
);

attr_record!(
    EllipseAttrs {
        @core: CoreAttrs,
        @style: StyleAttrs,
        @presentation: PresentationAttrs,
        cx: Length = "cx",
        cy: Length = "cy",
        rx: Length = "rx",
        ry: Length = "ry",
    }
);

attr_record!(
    /// Attributes of `polyline` and `polygon`.
    PolyAttrs {
        @core: CoreAttrs,
        @style: StyleAttrs,
        @presentation: PresentationAttrs,
        points: Points = "points",
    }
);

attr_record!(
    PathAttrs {
        @core: CoreAttrs,
        @style: StyleAttrs,
        @presentation: PresentationAttrs,
        d: PathCommands = "d",
    }
);

attr_record!(
    TextAttrs {
        @core: CoreAttrs,
        @style: StyleAttrs,
        @presentation: PresentationAttrs,
        x: Length = "x",
        y: Length = "y",
        dx: Length = "dx",
        dy: Length = "dy",
        text_anchor: TextAnchor = "text-anchor",
    }
);

attr_record!(
    /// Attributes of `g` and `defs`.
    GroupAttrs {
        @core: CoreAttrs,
        @style: StyleAttrs,
        @presentation: PresentationAttrs,
    }
);

attr_record!(
    LinearGradientAttrs {
        @core: CoreAttrs,
        @style: StyleAttrs,
        @presentation: PresentationAttrs,
        x1: Length = "x1",
        y1: Length = "y1",
        x2: Length = "x2",
        y2: Length = "y2",
        gradient_units: GradientUnits = "gradientUnits",
        gradient_transform: Transform = "gradientTransform",
        spread_method: SpreadMethod = "spreadMethod",
        href: String = "href",
        xlink_href: String = "xlink:href",
    }
);

attr_record!(
    RadialGradientAttrs {
        @core: CoreAttrs,
        @style: StyleAttrs,
        @presentation: PresentationAttrs,
        cx: Length = "cx",
        cy: Length = "cy",
        r: Length = "r",
        fx: Length = "fx",
        fy: Length = "fy",
        gradient_units: GradientUnits = "gradientUnits",
        gradient_transform: Transform = "gradientTransform",
        spread_method: SpreadMethod = "spreadMethod",
        href: String = "href",
        xlink_href: String = "xlink:href",
    }
);

attr_record!(
    StopAttrs {
        @core: CoreAttrs,
        @style: StyleAttrs,
        offset: Ratio = "offset",
        stop_color: Color = "stop-color",
        stop_opacity: Ratio = "stop-opacity",
    }
);

attr_record!(
    ImageAttrs {
        @core: CoreAttrs,
        @style: StyleAttrs,
        @presentation: PresentationAttrs,
        x: Length = "x",
        y: Length = "y",
        width: Length = "width",
        height: Length = "height",
        href: String = "href",
        xlink_href: String = "xlink:href",
        preserve_aspect_ratio: String = "preserveAspectRatio",
    }
);

attr_record!(
    /// Attributes of `use`.
    ///
    /// `virtual_box` is a derived value and is never written.
    UseAttrs {
        @core: CoreAttrs,
        @style: StyleAttrs,
        @presentation: PresentationAttrs,
        x: Length = "x",
        y: Length = "y",
        width: Length = "width",
        height: Length = "height",
        href: String = "href",
        xlink_href: String = "xlink:href",
        ;
        virtual_box: VirtualCache,
    }
);

attr_record!(
    /// Attributes of the `style` element.
    StyleElementAttrs {
        @core: CoreAttrs,
        content_type: String = "type",
        media: String = "media",
    }
);

attr_record!(
    ScriptAttrs {
        @core: CoreAttrs,
        content_type: String = "type",
        href: String = "href",
        xlink_href: String = "xlink:href",
    }
);

attr_record!(
    /// Attributes shared by all animation elements.
    ///
    /// Timing values are kept as strings.
    AnimationAttrs {
        @core: CoreAttrs,
        href: String = "href",
        xlink_href: String = "xlink:href",
        attribute_name: String = "attributeName",
        attribute_type: String = "attributeType",
        begin: String = "begin",
        dur: String = "dur",
        end: String = "end",
        min: String = "min",
        max: String = "max",
        restart: String = "restart",
        repeat_count: String = "repeatCount",
        repeat_dur: String = "repeatDur",
        fill: String = "fill",
        calc_mode: String = "calcMode",
        values: String = "values",
        key_times: String = "keyTimes",
        key_splines: String = "keySplines",
        from: String = "from",
        to: String = "to",
        by: String = "by",
        additive: String = "additive",
        accumulate: String = "accumulate",
    }
);

attr_record!(
    AnimateTransformAttrs {
        @animation: AnimationAttrs,
        transform_type: String = "type",
    }
);

attr_record!(
    AnimateMotionAttrs {
        @animation: AnimationAttrs,
        path: PathCommands = "path",
        key_points: String = "keyPoints",
        rotate: String = "rotate",
        origin: String = "origin",
    }
);

attr_record!(
    MpathAttrs {
        @core: CoreAttrs,
        href: String = "href",
        xlink_href: String = "xlink:href",
    }
);

attr_record!(
    DiscardAttrs {
        @core: CoreAttrs,
        href: String = "href",
        xlink_href: String = "xlink:href",
        begin: String = "begin",
    }
);

/// Generic access to an element attribute record.
pub trait ElementAttrs {
    #[allow(missing_docs)]
    fn core(&self) -> &CoreAttrs;
    #[allow(missing_docs)]
    fn core_mut(&mut self) -> &mut CoreAttrs;
    /// Returns the `class` and `style` attributes, if the element supports them.
    fn style_attrs(&self) -> Option<&StyleAttrs>;
    /// Returns presentation attributes, if the element supports them.
    fn presentation(&self) -> Option<&PresentationAttrs>;
    #[allow(missing_docs)]
    fn presentation_mut(&mut self) -> Option<&mut PresentationAttrs>;
    /// Appends all set attributes.
    fn collect_attrs(&self, out: &mut Vec<(&'static str, AttrValue)>);
    /// See [`AttrRecord::assign`].
    fn assign_attr(&mut self, name: &str, raw: &str) -> Option<Result<(), ValueError>>;
    /// See [`AttrRecord::clear`].
    fn clear_attr(&mut self, name: &str) -> bool;
}

macro_rules! element_attrs {
    (@common) => (
        fn collect_attrs(&self, out: &mut Vec<(&'static str, AttrValue)>) {
            self.collect(out)
        }

        fn assign_attr(&mut self, name: &str, raw: &str) -> Option<Result<(), ValueError>> {
            self.assign(name, raw)
        }

        fn clear_attr(&mut self, name: &str) -> bool {
            self.clear(name)
        }
    );
    (@full $($name:ident),+) => ($(
        impl ElementAttrs for $name {
            fn core(&self) -> &CoreAttrs { &self.core }
            fn core_mut(&mut self) -> &mut CoreAttrs { &mut self.core }
            fn style_attrs(&self) -> Option<&StyleAttrs> { Some(&self.style) }
            fn presentation(&self) -> Option<&PresentationAttrs> { Some(&self.presentation) }
            fn presentation_mut(&mut self) -> Option<&mut PresentationAttrs> {
                Some(&mut self.presentation)
            }
            element_attrs!(@common);
        }
    )+);
    (@styled $($name:ident),+) => ($(
        impl ElementAttrs for $name {
            fn core(&self) -> &CoreAttrs { &self.core }
            fn core_mut(&mut self) -> &mut CoreAttrs { &mut self.core }
            fn style_attrs(&self) -> Option<&StyleAttrs> { Some(&self.style) }
            fn presentation(&self) -> Option<&PresentationAttrs> { None }
            fn presentation_mut(&mut self) -> Option<&mut PresentationAttrs> { None }
            element_attrs!(@common);
        }
    )+);
    (@core $($name:ident),+) => ($(
        impl ElementAttrs for $name {
            fn core(&self) -> &CoreAttrs { &self.core }
            fn core_mut(&mut self) -> &mut CoreAttrs { &mut self.core }
            fn style_attrs(&self) -> Option<&StyleAttrs> { None }
            fn presentation(&self) -> Option<&PresentationAttrs> { None }
            fn presentation_mut(&mut self) -> Option<&mut PresentationAttrs> { None }
            element_attrs!(@common);
        }
    )+);
    (@animation $($name:ident),+) => ($(
        impl ElementAttrs for $name {
            fn core(&self) -> &CoreAttrs { &self.animation.core }
            fn core_mut(&mut self) -> &mut CoreAttrs { &mut self.animation.core }
            fn style_attrs(&self) -> Option<&StyleAttrs> { None }
            fn presentation(&self) -> Option<&PresentationAttrs> { None }
            fn presentation_mut(&mut self) -> Option<&mut PresentationAttrs> { None }
            element_attrs!(@common);
        }
    )+);
}

element_attrs!(@full
    SvgAttrs, CircleAttrs, RectAttrs, EllipseAttrs, PolyAttrs, PathAttrs, TextAttrs, GroupAttrs,
    LinearGradientAttrs, RadialGradientAttrs, ImageAttrs, UseAttrs
);
element_attrs!(@styled StopAttrs);
element_attrs!(@core StyleElementAttrs, ScriptAttrs, AnimationAttrs, MpathAttrs, DiscardAttrs);
element_attrs!(@animation AnimateTransformAttrs, AnimateMotionAttrs);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml;

    fn claim<T: AttrRecord>(text: &str) -> (T, usize, usize) {
        let root = xml::parse(text).unwrap().unwrap();
        let mut warns = Vec::new();
        let mut claims = AttrClaims::new(&root, &mut warns);
        let record = T::claim(&mut claims);
        let unknown = claims.finish().len();
        (record, unknown, warns.len())
    }

    #[test]
    fn claim_groups() {
        let (rect, unknown, warns) = claim::<RectAttrs>(
            "<rect id=\"r1\" class=\"a b\" fill=\"red\" x=\"10\" rx=\"2%\"/>",
        );
        assert_eq!(rect.core.id.as_deref(), Some("r1"));
        assert!(rect.style.class.as_ref().unwrap().contains("b"));
        assert!(rect.presentation.fill.is_some());
        assert_eq!(rect.x, Some(Length::new(10.0, None, "x")));
        assert_eq!(rect.rx, Some(Length::new(2.0, Some(LengthUnit::Percent), "rx")));
        assert_eq!(rect.y, None);
        assert_eq!(unknown, 0);
        assert_eq!(warns, 0);
    }

    #[test]
    fn claim_nested_group() {
        let (anim, unknown, _) = claim::<AnimateTransformAttrs>(
            "<animateTransform id=\"a\" type=\"rotate\" dur=\"2s\"/>",
        );
        assert_eq!(anim.animation.core.id.as_deref(), Some("a"));
        assert_eq!(anim.animation.dur.as_deref(), Some("2s"));
        assert_eq!(anim.transform_type.as_deref(), Some("rotate"));
        assert_eq!(unknown, 0);
    }

    #[test]
    fn collect_order() {
        let (circle, _, _) = claim::<CircleAttrs>("<circle r=\"4\" id=\"c\" cx=\"1\"/>");
        let names: Vec<&str> = {
            let mut out = Vec::new();
            circle.collect(&mut out);
            out.into_iter().map(|(name, _)| name).collect()
        };
        assert_eq!(names, ["id", "cx", "r"]);
    }

    #[test]
    fn assign_and_clear() {
        let mut circle = CircleAttrs::default();
        assert!(circle.assign("r", "5").unwrap().is_ok());
        assert!(circle.assign("stroke", "blue").unwrap().is_ok());
        assert!(circle.assign("cx", "wide").unwrap().is_err());
        assert!(circle.assign("points", "1 2").is_none());
        assert_eq!(circle.r, Some(Length::new(5.0, None, "r")));
        assert!(circle.presentation.stroke.is_some());

        assert!(circle.clear("stroke"));
        assert!(circle.presentation.stroke.is_none());
        assert!(!circle.clear("points"));
    }

    #[test]
    fn overlay_1() {
        let mut base = PresentationAttrs::default();
        base.assign("fill", "red").unwrap().unwrap();
        base.assign("stroke", "blue").unwrap().unwrap();
        let mut top = PresentationAttrs::default();
        top.assign("fill", "green").unwrap().unwrap();
        base.overlay(&top);
        assert_eq!(base.fill, Paint::accept("green", "fill").ok());
        assert_eq!(base.stroke, Paint::accept("blue", "stroke").ok());
    }

    #[test]
    fn inheritable_1() {
        let mut p = PresentationAttrs::default();
        p.assign("opacity", "0.5").unwrap().unwrap();
        p.assign("transform", "scale(2)").unwrap().unwrap();
        p.assign("fill", "red").unwrap().unwrap();
        let inherited = p.inheritable();
        assert!(inherited.opacity.is_none());
        assert!(inherited.transform.is_none());
        assert!(inherited.fill.is_some());
    }
}
