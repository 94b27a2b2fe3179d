// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed record kinds
//!
//! One struct per IFC4 entity the exporter writes, each carrying exactly
//! its own attributes. [`Entity`] closes over all of them and knows the
//! STEP type name and attribute layout of every kind.

use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

use crate::attribute::{
    boolean, derived, enumerated, integer, omitted, optional_reference, optional_text, real,
    real_list, reference, reference_list, text, AttributeValue,
};
use crate::guid::GlobalId;
use crate::id::EntityId;

/// Coordinate tuple of a point or direction (2 or 3 components)
pub type Coordinates = SmallVec<[f64; 3]>;

// ============================================================================
// Enumerations
// ============================================================================

/// `IfcSurfaceSide`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceSide {
    Positive,
    Negative,
    Both,
}

impl SurfaceSide {
    pub fn symbol(self) -> &'static str {
        match self {
            SurfaceSide::Positive => "POSITIVE",
            SurfaceSide::Negative => "NEGATIVE",
            SurfaceSide::Both => "BOTH",
        }
    }
}

/// `IfcProfileTypeEnum`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileType {
    Curve,
    Area,
}

impl ProfileType {
    pub fn symbol(self) -> &'static str {
        match self {
            ProfileType::Curve => "CURVE",
            ProfileType::Area => "AREA",
        }
    }
}

/// `IfcGeometricProjectionEnum`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetView {
    GraphView,
    SketchView,
    ModelView,
    PlanView,
    ReflectedPlanView,
    SectionView,
    ElevationView,
    NotDefined,
}

impl TargetView {
    pub fn symbol(self) -> &'static str {
        match self {
            TargetView::GraphView => "GRAPH_VIEW",
            TargetView::SketchView => "SKETCH_VIEW",
            TargetView::ModelView => "MODEL_VIEW",
            TargetView::PlanView => "PLAN_VIEW",
            TargetView::ReflectedPlanView => "REFLECTED_PLAN_VIEW",
            TargetView::SectionView => "SECTION_VIEW",
            TargetView::ElevationView => "ELEVATION_VIEW",
            TargetView::NotDefined => "NOTDEFINED",
        }
    }
}

/// `IfcUnitEnum` (the subset the exporter assigns)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitType {
    Length,
    Area,
    Volume,
    Mass,
    SolidAngle,
    Time,
    ThermodynamicTemperature,
    LuminousIntensity,
}

impl UnitType {
    pub fn symbol(self) -> &'static str {
        match self {
            UnitType::Length => "LENGTHUNIT",
            UnitType::Area => "AREAUNIT",
            UnitType::Volume => "VOLUMEUNIT",
            UnitType::Mass => "MASSUNIT",
            UnitType::SolidAngle => "SOLIDANGLEUNIT",
            UnitType::Time => "TIMEUNIT",
            UnitType::ThermodynamicTemperature => "THERMODYNAMICTEMPERATUREUNIT",
            UnitType::LuminousIntensity => "LUMINOUSINTENSITYUNIT",
        }
    }
}

/// `IfcSIUnitName` (the subset the exporter assigns)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiUnitName {
    Metre,
    SquareMetre,
    CubicMetre,
    Gram,
    Steradian,
    Second,
    DegreeCelsius,
    Lumen,
}

impl SiUnitName {
    pub fn symbol(self) -> &'static str {
        match self {
            SiUnitName::Metre => "METRE",
            SiUnitName::SquareMetre => "SQUARE_METRE",
            SiUnitName::CubicMetre => "CUBIC_METRE",
            SiUnitName::Gram => "GRAM",
            SiUnitName::Steradian => "STERADIAN",
            SiUnitName::Second => "SECOND",
            SiUnitName::DegreeCelsius => "DEGREE_CELSIUS",
            SiUnitName::Lumen => "LUMEN",
        }
    }
}

/// `IfcElementCompositionEnum`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionType {
    Complex,
    Element,
    Partial,
}

impl CompositionType {
    pub fn symbol(self) -> &'static str {
        match self {
            CompositionType::Complex => "COMPLEX",
            CompositionType::Element => "ELEMENT",
            CompositionType::Partial => "PARTIAL",
        }
    }
}

/// Building element kinds a product record can be written as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum ElementType {
    BuildingElementProxy,
    Beam,
    Column,
    Covering,
    CurtainWall,
    Door,
    Footing,
    Furniture,
    Member,
    Plate,
    Railing,
    Ramp,
    Roof,
    Slab,
    Stair,
    Wall,
    WallStandardCase,
    Window,
}

impl ElementType {
    pub const ALL: [ElementType; 18] = [
        ElementType::BuildingElementProxy,
        ElementType::Beam,
        ElementType::Column,
        ElementType::Covering,
        ElementType::CurtainWall,
        ElementType::Door,
        ElementType::Footing,
        ElementType::Furniture,
        ElementType::Member,
        ElementType::Plate,
        ElementType::Railing,
        ElementType::Ramp,
        ElementType::Roof,
        ElementType::Slab,
        ElementType::Stair,
        ElementType::Wall,
        ElementType::WallStandardCase,
        ElementType::Window,
    ];

    /// STEP type name (`IFCWALL`)
    pub fn type_name(self) -> &'static str {
        match self {
            ElementType::BuildingElementProxy => "IFCBUILDINGELEMENTPROXY",
            ElementType::Beam => "IFCBEAM",
            ElementType::Column => "IFCCOLUMN",
            ElementType::Covering => "IFCCOVERING",
            ElementType::CurtainWall => "IFCCURTAINWALL",
            ElementType::Door => "IFCDOOR",
            ElementType::Footing => "IFCFOOTING",
            ElementType::Furniture => "IFCFURNITURE",
            ElementType::Member => "IFCMEMBER",
            ElementType::Plate => "IFCPLATE",
            ElementType::Railing => "IFCRAILING",
            ElementType::Ramp => "IFCRAMP",
            ElementType::Roof => "IFCROOF",
            ElementType::Slab => "IFCSLAB",
            ElementType::Stair => "IFCSTAIR",
            ElementType::Wall => "IFCWALL",
            ElementType::WallStandardCase => "IFCWALLSTANDARDCASE",
            ElementType::Window => "IFCWINDOW",
        }
    }

    /// Schema-cased name (`IfcWall`)
    pub fn name(self) -> &'static str {
        match self {
            ElementType::BuildingElementProxy => "IfcBuildingElementProxy",
            ElementType::Beam => "IfcBeam",
            ElementType::Column => "IfcColumn",
            ElementType::Covering => "IfcCovering",
            ElementType::CurtainWall => "IfcCurtainWall",
            ElementType::Door => "IfcDoor",
            ElementType::Footing => "IfcFooting",
            ElementType::Furniture => "IfcFurniture",
            ElementType::Member => "IfcMember",
            ElementType::Plate => "IfcPlate",
            ElementType::Railing => "IfcRailing",
            ElementType::Ramp => "IfcRamp",
            ElementType::Roof => "IfcRoof",
            ElementType::Slab => "IfcSlab",
            ElementType::Stair => "IfcStair",
            ElementType::Wall => "IfcWall",
            ElementType::WallStandardCase => "IfcWallStandardCase",
            ElementType::Window => "IfcWindow",
        }
    }

    /// Attributes after `Tag` that the exporter leaves unset.
    ///
    /// Doors and windows carry overall height/width, predefined type and
    /// partitioning attributes; every other kind here ends in `PredefinedType`.
    fn trailing_attributes(self) -> usize {
        match self {
            ElementType::Door | ElementType::Window => 5,
            _ => 1,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown element type name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownElementType(pub String);

impl fmt::Display for UnknownElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown element type '{}'", self.0)
    }
}

impl std::error::Error for UnknownElementType {}

impl FromStr for ElementType {
    type Err = UnknownElementType;

    /// Accepts `IFCWALL`, `IfcWall` and `Wall`, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let wanted = if upper.starts_with("IFC") {
            upper
        } else {
            format!("IFC{}", upper)
        };
        ElementType::ALL
            .iter()
            .copied()
            .find(|t| t.type_name() == wanted)
            .ok_or_else(|| UnknownElementType(s.to_string()))
    }
}

impl TryFrom<String> for ElementType {
    type Error = UnknownElementType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ElementType> for String {
    fn from(value: ElementType) -> Self {
        value.name().to_string()
    }
}

// ============================================================================
// Geometry and topology
// ============================================================================

/// `IfcCartesianPoint`
#[derive(Debug, Clone, PartialEq)]
pub struct CartesianPoint {
    pub coordinates: Coordinates,
}

/// `IfcDirection`
#[derive(Debug, Clone, PartialEq)]
pub struct Direction {
    pub ratios: Coordinates,
}

/// `IfcPolyLoop`
#[derive(Debug, Clone, PartialEq)]
pub struct PolyLoop {
    pub polygon: Vec<EntityId>,
}

/// `IfcFaceOuterBound`
#[derive(Debug, Clone, PartialEq)]
pub struct FaceOuterBound {
    pub bound: EntityId,
    pub orientation: bool,
}

/// `IfcFace`
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub bounds: Vec<EntityId>,
}

/// `IfcClosedShell`
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedShell {
    pub faces: Vec<EntityId>,
}

/// `IfcFacetedBrep`
#[derive(Debug, Clone, PartialEq)]
pub struct FacetedBrep {
    pub outer: EntityId,
}

/// `IfcAxis2Placement3D`; axis and reference direction are never written
#[derive(Debug, Clone, PartialEq)]
pub struct Axis2Placement3D {
    pub location: EntityId,
}

/// `IfcAxis2Placement2D`
#[derive(Debug, Clone, PartialEq)]
pub struct Axis2Placement2D {
    pub location: EntityId,
}

/// `IfcLocalPlacement`
#[derive(Debug, Clone, PartialEq)]
pub struct LocalPlacement {
    pub placement_rel_to: Option<EntityId>,
    pub relative_placement: EntityId,
}

/// `IfcCircleProfileDef`
#[derive(Debug, Clone, PartialEq)]
pub struct CircleProfileDef {
    pub profile_type: ProfileType,
    pub name: Option<String>,
    pub position: EntityId,
    pub radius: f64,
}

/// `IfcExtrudedAreaSolid`
#[derive(Debug, Clone, PartialEq)]
pub struct ExtrudedAreaSolid {
    pub swept_area: EntityId,
    pub position: EntityId,
    pub extruded_direction: EntityId,
    pub depth: f64,
}

// ============================================================================
// Presentation
// ============================================================================

/// `IfcColourRgb`
#[derive(Debug, Clone, PartialEq)]
pub struct ColourRgb {
    pub name: Option<String>,
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

/// `IfcSurfaceStyleShading`
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceStyleShading {
    pub surface_colour: EntityId,
    /// 0 is opaque, 1 fully transparent
    pub transparency: f64,
}

/// `IfcSurfaceStyle`
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceStyle {
    pub name: Option<String>,
    pub side: SurfaceSide,
    pub styles: Vec<EntityId>,
}

/// `IfcPresentationStyleAssignment`
#[derive(Debug, Clone, PartialEq)]
pub struct PresentationStyleAssignment {
    pub styles: Vec<EntityId>,
}

/// `IfcStyledItem`
#[derive(Debug, Clone, PartialEq)]
pub struct StyledItem {
    pub item: Option<EntityId>,
    pub styles: Vec<EntityId>,
    pub name: Option<String>,
}

// ============================================================================
// Representation
// ============================================================================

/// `IfcGeometricRepresentationContext`
#[derive(Debug, Clone, PartialEq)]
pub struct GeometricRepresentationContext {
    pub context_identifier: Option<String>,
    pub context_type: String,
    pub dimension: i64,
    pub precision: f64,
    pub world_coordinate_system: EntityId,
    pub true_north: Option<EntityId>,
}

/// `IfcGeometricRepresentationSubContext`; inherited attributes are derived (`*`)
#[derive(Debug, Clone, PartialEq)]
pub struct GeometricRepresentationSubContext {
    pub context_identifier: String,
    pub context_type: String,
    pub parent: EntityId,
    pub target_view: TargetView,
}

/// `IfcShapeRepresentation`
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeRepresentation {
    pub context: EntityId,
    pub identifier: String,
    pub representation_type: String,
    pub items: Vec<EntityId>,
}

/// `IfcProductDefinitionShape`
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDefinitionShape {
    pub name: Option<String>,
    pub description: Option<String>,
    pub representations: Vec<EntityId>,
}

// ============================================================================
// Units
// ============================================================================

/// `IfcSIUnit` without prefix; dimensions are derived from the unit type
#[derive(Debug, Clone, PartialEq)]
pub struct SiUnit {
    pub unit_type: UnitType,
    pub name: SiUnitName,
}

/// `IfcUnitAssignment`
#[derive(Debug, Clone, PartialEq)]
pub struct UnitAssignment {
    pub units: Vec<EntityId>,
}

// ============================================================================
// Spatial structure and products
// ============================================================================

/// `IfcProject`
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub global_id: GlobalId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub representation_contexts: Vec<EntityId>,
    pub units_in_context: EntityId,
}

/// Attributes shared by `IfcSite`, `IfcBuilding` and `IfcBuildingStorey`
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialStructure {
    pub global_id: GlobalId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub object_type: Option<String>,
    pub placement: EntityId,
    pub long_name: Option<String>,
    pub composition: CompositionType,
}

/// Building element (`IfcWall`, `IfcSlab`, ...)
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub element_type: ElementType,
    pub global_id: GlobalId,
    pub name: Option<String>,
    pub object_type: Option<String>,
    pub placement: EntityId,
    pub representation: Option<EntityId>,
    pub tag: Option<String>,
}

/// `IfcRelAggregates`
#[derive(Debug, Clone, PartialEq)]
pub struct RelAggregates {
    pub global_id: GlobalId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub relating_object: EntityId,
    pub related_objects: Vec<EntityId>,
}

/// `IfcRelContainedInSpatialStructure`
#[derive(Debug, Clone, PartialEq)]
pub struct RelContainedInSpatialStructure {
    pub global_id: GlobalId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub related_elements: Vec<EntityId>,
    pub relating_structure: EntityId,
}

// ============================================================================
// Entity
// ============================================================================

/// Every record kind the exporter writes
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    CartesianPoint(CartesianPoint),
    Direction(Direction),
    PolyLoop(PolyLoop),
    FaceOuterBound(FaceOuterBound),
    Face(Face),
    ClosedShell(ClosedShell),
    FacetedBrep(FacetedBrep),
    Axis2Placement3D(Axis2Placement3D),
    Axis2Placement2D(Axis2Placement2D),
    LocalPlacement(LocalPlacement),
    CircleProfileDef(CircleProfileDef),
    ExtrudedAreaSolid(ExtrudedAreaSolid),
    ColourRgb(ColourRgb),
    SurfaceStyleShading(SurfaceStyleShading),
    SurfaceStyle(SurfaceStyle),
    PresentationStyleAssignment(PresentationStyleAssignment),
    StyledItem(StyledItem),
    GeometricRepresentationContext(GeometricRepresentationContext),
    GeometricRepresentationSubContext(GeometricRepresentationSubContext),
    ShapeRepresentation(ShapeRepresentation),
    ProductDefinitionShape(ProductDefinitionShape),
    SiUnit(SiUnit),
    UnitAssignment(UnitAssignment),
    Project(Project),
    Site(SpatialStructure),
    Building(SpatialStructure),
    BuildingStorey(SpatialStructure),
    Product(Product),
    RelAggregates(RelAggregates),
    RelContainedInSpatialStructure(RelContainedInSpatialStructure),
}

macro_rules! impl_from_kind {
    ($($kind:ident),* $(,)?) => {
        $(
            impl From<$kind> for Entity {
                fn from(value: $kind) -> Self {
                    Entity::$kind(value)
                }
            }
        )*
    };
}

impl_from_kind!(
    CartesianPoint,
    Direction,
    PolyLoop,
    FaceOuterBound,
    Face,
    ClosedShell,
    FacetedBrep,
    Axis2Placement3D,
    Axis2Placement2D,
    LocalPlacement,
    CircleProfileDef,
    ExtrudedAreaSolid,
    ColourRgb,
    SurfaceStyleShading,
    SurfaceStyle,
    PresentationStyleAssignment,
    StyledItem,
    GeometricRepresentationContext,
    GeometricRepresentationSubContext,
    ShapeRepresentation,
    ProductDefinitionShape,
    SiUnit,
    UnitAssignment,
    Project,
    Product,
    RelAggregates,
    RelContainedInSpatialStructure,
);

/// Push `count` omitted attributes
fn pad_omitted(attrs: &mut Vec<AttributeValue>, count: usize) {
    attrs.extend(std::iter::repeat_with(omitted).take(count));
}

/// IfcRoot prefix: GlobalId, OwnerHistory, Name, Description
fn root_attributes(
    global_id: &GlobalId,
    name: Option<&str>,
    description: Option<&str>,
) -> Vec<AttributeValue> {
    vec![
        text(global_id.as_str()),
        omitted(),
        optional_text(name),
        optional_text(description),
    ]
}

/// Spatial element attributes up to CompositionType
fn spatial_attributes(s: &SpatialStructure) -> Vec<AttributeValue> {
    let mut attrs = root_attributes(&s.global_id, s.name.as_deref(), s.description.as_deref());
    attrs.push(optional_text(s.object_type.as_deref()));
    attrs.push(reference(s.placement));
    attrs.push(omitted()); // Representation
    attrs.push(optional_text(s.long_name.as_deref()));
    attrs.push(enumerated(s.composition.symbol()));
    attrs
}

impl Entity {
    /// STEP type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Entity::CartesianPoint(_) => "IFCCARTESIANPOINT",
            Entity::Direction(_) => "IFCDIRECTION",
            Entity::PolyLoop(_) => "IFCPOLYLOOP",
            Entity::FaceOuterBound(_) => "IFCFACEOUTERBOUND",
            Entity::Face(_) => "IFCFACE",
            Entity::ClosedShell(_) => "IFCCLOSEDSHELL",
            Entity::FacetedBrep(_) => "IFCFACETEDBREP",
            Entity::Axis2Placement3D(_) => "IFCAXIS2PLACEMENT3D",
            Entity::Axis2Placement2D(_) => "IFCAXIS2PLACEMENT2D",
            Entity::LocalPlacement(_) => "IFCLOCALPLACEMENT",
            Entity::CircleProfileDef(_) => "IFCCIRCLEPROFILEDEF",
            Entity::ExtrudedAreaSolid(_) => "IFCEXTRUDEDAREASOLID",
            Entity::ColourRgb(_) => "IFCCOLOURRGB",
            Entity::SurfaceStyleShading(_) => "IFCSURFACESTYLESHADING",
            Entity::SurfaceStyle(_) => "IFCSURFACESTYLE",
            Entity::PresentationStyleAssignment(_) => "IFCPRESENTATIONSTYLEASSIGNMENT",
            Entity::StyledItem(_) => "IFCSTYLEDITEM",
            Entity::GeometricRepresentationContext(_) => "IFCGEOMETRICREPRESENTATIONCONTEXT",
            Entity::GeometricRepresentationSubContext(_) => {
                "IFCGEOMETRICREPRESENTATIONSUBCONTEXT"
            }
            Entity::ShapeRepresentation(_) => "IFCSHAPEREPRESENTATION",
            Entity::ProductDefinitionShape(_) => "IFCPRODUCTDEFINITIONSHAPE",
            Entity::SiUnit(_) => "IFCSIUNIT",
            Entity::UnitAssignment(_) => "IFCUNITASSIGNMENT",
            Entity::Project(_) => "IFCPROJECT",
            Entity::Site(_) => "IFCSITE",
            Entity::Building(_) => "IFCBUILDING",
            Entity::BuildingStorey(_) => "IFCBUILDINGSTOREY",
            Entity::Product(p) => p.element_type.type_name(),
            Entity::RelAggregates(_) => "IFCRELAGGREGATES",
            Entity::RelContainedInSpatialStructure(_) => "IFCRELCONTAINEDINSPATIALSTRUCTURE",
        }
    }

    /// Attribute values in schema order
    pub fn attributes(&self) -> Vec<AttributeValue> {
        match self {
            Entity::CartesianPoint(p) => vec![real_list(&p.coordinates)],
            Entity::Direction(d) => vec![real_list(&d.ratios)],
            Entity::PolyLoop(l) => vec![reference_list(&l.polygon)],
            Entity::FaceOuterBound(b) => vec![reference(b.bound), boolean(b.orientation)],
            Entity::Face(f) => vec![reference_list(&f.bounds)],
            Entity::ClosedShell(s) => vec![reference_list(&s.faces)],
            Entity::FacetedBrep(b) => vec![reference(b.outer)],
            Entity::Axis2Placement3D(a) => vec![reference(a.location), omitted(), omitted()],
            Entity::Axis2Placement2D(a) => vec![reference(a.location), omitted()],
            Entity::LocalPlacement(l) => vec![
                optional_reference(l.placement_rel_to),
                reference(l.relative_placement),
            ],
            Entity::CircleProfileDef(c) => vec![
                enumerated(c.profile_type.symbol()),
                optional_text(c.name.as_deref()),
                reference(c.position),
                real(c.radius),
            ],
            Entity::ExtrudedAreaSolid(e) => vec![
                reference(e.swept_area),
                reference(e.position),
                reference(e.extruded_direction),
                real(e.depth),
            ],
            Entity::ColourRgb(c) => vec![
                optional_text(c.name.as_deref()),
                real(c.red),
                real(c.green),
                real(c.blue),
            ],
            Entity::SurfaceStyleShading(s) => {
                vec![reference(s.surface_colour), real(s.transparency)]
            }
            Entity::SurfaceStyle(s) => vec![
                optional_text(s.name.as_deref()),
                enumerated(s.side.symbol()),
                reference_list(&s.styles),
            ],
            Entity::PresentationStyleAssignment(p) => vec![reference_list(&p.styles)],
            Entity::StyledItem(s) => vec![
                optional_reference(s.item),
                reference_list(&s.styles),
                optional_text(s.name.as_deref()),
            ],
            Entity::GeometricRepresentationContext(c) => vec![
                optional_text(c.context_identifier.as_deref()),
                text(c.context_type.as_str()),
                integer(c.dimension),
                real(c.precision),
                reference(c.world_coordinate_system),
                optional_reference(c.true_north),
            ],
            Entity::GeometricRepresentationSubContext(c) => vec![
                text(c.context_identifier.as_str()),
                text(c.context_type.as_str()),
                derived(),
                derived(),
                derived(),
                derived(),
                reference(c.parent),
                omitted(),
                enumerated(c.target_view.symbol()),
                omitted(),
            ],
            Entity::ShapeRepresentation(s) => vec![
                reference(s.context),
                text(s.identifier.as_str()),
                text(s.representation_type.as_str()),
                reference_list(&s.items),
            ],
            Entity::ProductDefinitionShape(p) => vec![
                optional_text(p.name.as_deref()),
                optional_text(p.description.as_deref()),
                reference_list(&p.representations),
            ],
            Entity::SiUnit(u) => vec![
                derived(),
                enumerated(u.unit_type.symbol()),
                omitted(),
                enumerated(u.name.symbol()),
            ],
            Entity::UnitAssignment(u) => vec![reference_list(&u.units)],
            Entity::Project(p) => {
                let mut attrs =
                    root_attributes(&p.global_id, p.name.as_deref(), p.description.as_deref());
                // ObjectType, LongName, Phase
                pad_omitted(&mut attrs, 3);
                attrs.push(reference_list(&p.representation_contexts));
                attrs.push(reference(p.units_in_context));
                attrs
            }
            Entity::Site(s) => {
                let mut attrs = spatial_attributes(s);
                // RefLatitude, RefLongitude, RefElevation, LandTitleNumber, SiteAddress
                pad_omitted(&mut attrs, 5);
                attrs
            }
            Entity::Building(s) => {
                let mut attrs = spatial_attributes(s);
                // ElevationOfRefHeight, ElevationOfTerrain, BuildingAddress
                pad_omitted(&mut attrs, 3);
                attrs
            }
            Entity::BuildingStorey(s) => {
                let mut attrs = spatial_attributes(s);
                // Elevation
                pad_omitted(&mut attrs, 1);
                attrs
            }
            Entity::Product(p) => {
                let mut attrs = root_attributes(&p.global_id, p.name.as_deref(), None);
                attrs.push(optional_text(p.object_type.as_deref()));
                attrs.push(reference(p.placement));
                attrs.push(optional_reference(p.representation));
                attrs.push(optional_text(p.tag.as_deref()));
                pad_omitted(&mut attrs, p.element_type.trailing_attributes());
                attrs
            }
            Entity::RelAggregates(r) => {
                let mut attrs =
                    root_attributes(&r.global_id, r.name.as_deref(), r.description.as_deref());
                attrs.push(reference(r.relating_object));
                attrs.push(reference_list(&r.related_objects));
                attrs
            }
            Entity::RelContainedInSpatialStructure(r) => {
                let mut attrs =
                    root_attributes(&r.global_id, r.name.as_deref(), r.description.as_deref());
                attrs.push(reference_list(&r.related_elements));
                attrs.push(reference(r.relating_structure));
                attrs
            }
        }
    }

    /// Records this entity points at, in attribute order
    pub fn references(&self) -> Vec<EntityId> {
        let mut out = Vec::new();
        for attr in self.attributes() {
            attr.collect_references(&mut out);
        }
        out
    }
}
