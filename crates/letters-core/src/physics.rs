//! Minimal rigid-body world for the hanging letters.
//!
//! Position-based integration with max-distance rope constraints and
//! sphere-sphere contacts. Bodies integrate with semi-implicit Euler, ropes
//! are solved positionally (the correction is split between translation and
//! rotation at the attachment lever), and velocities are recomputed from
//! positions after the solve so constraint corrections never inject energy.

use fnv::FnvHashSet;
use glam::{Quat, Vec3};

use crate::constants::{RESTITUTION, ROPE_ITERATIONS, SUBSTEPS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyKind {
    /// Immovable. Anchors.
    Fixed,
    /// Simulated. Letters.
    Dynamic,
    /// Externally driven position, infinite mass in contacts. The pointer.
    Kinematic,
}

#[derive(Clone, Debug)]
pub struct RigidBody {
    pub kind: BodyKind,
    pub position: Vec3,
    pub orientation: Quat,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    pub mass: f32,
    pub inv_mass: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    /// Sphere collider radius; zero disables contacts for this body.
    pub radius: f32,
    inv_inertia: f32,
    prev_position: Vec3,
}

impl RigidBody {
    pub fn dynamic(position: Vec3, mass: f32, radius: f32) -> Self {
        let inv_mass = if mass > 0.0 { 1.0 / mass } else { 0.0 };
        // solid-sphere inertia approximation
        let inertia = 0.4 * mass * radius * radius;
        let inv_inertia = if inertia > 0.0 { 1.0 / inertia } else { 0.0 };
        Self {
            kind: BodyKind::Dynamic,
            position,
            orientation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            mass,
            inv_mass,
            linear_damping: 0.0,
            angular_damping: 0.0,
            radius,
            inv_inertia,
            prev_position: position,
        }
    }

    pub fn fixed(position: Vec3) -> Self {
        Self {
            kind: BodyKind::Fixed,
            position,
            orientation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            mass: 0.0,
            inv_mass: 0.0,
            linear_damping: 0.0,
            angular_damping: 0.0,
            radius: 0.0,
            inv_inertia: 0.0,
            prev_position: position,
        }
    }

    pub fn kinematic(position: Vec3, radius: f32) -> Self {
        Self {
            kind: BodyKind::Kinematic,
            radius,
            ..Self::fixed(position)
        }
    }

    /// Instantaneous momentum change at the center of mass.
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        if self.kind == BodyKind::Dynamic {
            self.velocity += impulse * self.inv_mass;
        }
    }

    pub fn set_linear_velocity(&mut self, velocity: Vec3) {
        if self.kind != BodyKind::Fixed {
            self.velocity = velocity;
        }
    }

    /// Letter-local offset into world space.
    #[inline]
    pub fn local_to_world(&self, offset: Vec3) -> Vec3 {
        self.position + self.orientation * offset
    }
}

/// Max-distance constraint between a fixed anchor and a body attachment
/// point. Slack rope is free; only over-length is corrected.
#[derive(Clone, Copy, Debug)]
pub struct RopeJoint {
    pub anchor: usize,
    pub body: usize,
    pub local_attach: Vec3,
    pub length: f32,
}

/// A contact that existed during the last `step`. Pairs are normalized with
/// `a < b`; `speed` is the largest approach speed seen over the substeps.
#[derive(Clone, Copy, Debug)]
pub struct Contact {
    pub a: usize,
    pub b: usize,
    pub speed: f32,
}

pub struct PhysicsWorld {
    pub bodies: Vec<RigidBody>,
    pub ropes: Vec<RopeJoint>,
    pub gravity: Vec3,
    pub substeps: u32,
}

impl PhysicsWorld {
    pub fn new(gravity: Vec3) -> Self {
        Self {
            bodies: Vec::new(),
            ropes: Vec::new(),
            gravity,
            substeps: SUBSTEPS,
        }
    }

    pub fn add_body(&mut self, body: RigidBody) -> usize {
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    pub fn body(&self, index: usize) -> Option<&RigidBody> {
        self.bodies.get(index)
    }

    pub fn body_mut(&mut self, index: usize) -> Option<&mut RigidBody> {
        self.bodies.get_mut(index)
    }

    pub fn attach_rope(&mut self, anchor: usize, body: usize, local_attach: Vec3, length: f32) {
        self.ropes.push(RopeJoint {
            anchor,
            body,
            local_attach,
            length,
        });
    }

    /// World-space endpoints of a rope: (anchor, attachment).
    pub fn rope_endpoints(&self, rope: &RopeJoint) -> Option<(Vec3, Vec3)> {
        let anchor = self.bodies.get(rope.anchor)?;
        let body = self.bodies.get(rope.body)?;
        Some((anchor.position, body.local_to_world(rope.local_attach)))
    }

    /// Advance the world by `dt`, returning the contacts seen this step.
    pub fn step(&mut self, dt: f32) -> Vec<Contact> {
        if dt <= 0.0 || self.substeps == 0 {
            return Vec::new();
        }
        let sdt = dt / self.substeps as f32;
        let mut pairs: FnvHashSet<(usize, usize)> = FnvHashSet::default();
        let mut speeds: Vec<((usize, usize), f32)> = Vec::new();

        for _ in 0..self.substeps {
            self.integrate(sdt);
            for _ in 0..ROPE_ITERATIONS {
                for r in 0..self.ropes.len() {
                    self.solve_rope(r);
                }
            }
            self.update_velocities(sdt);
            self.resolve_contacts(&mut pairs, &mut speeds);
        }

        pairs
            .into_iter()
            .map(|p| {
                let speed = speeds
                    .iter()
                    .filter(|(q, _)| *q == p)
                    .map(|(_, s)| *s)
                    .fold(0.0, f32::max);
                Contact {
                    a: p.0,
                    b: p.1,
                    speed,
                }
            })
            .collect()
    }

    fn integrate(&mut self, sdt: f32) {
        for b in &mut self.bodies {
            b.prev_position = b.position;
            match b.kind {
                BodyKind::Fixed => {}
                BodyKind::Kinematic => {
                    b.position += b.velocity * sdt;
                }
                BodyKind::Dynamic => {
                    b.velocity += self.gravity * sdt;
                    b.velocity *= (1.0 - b.linear_damping * sdt).max(0.0);
                    b.position += b.velocity * sdt;
                    b.angular_velocity *= (1.0 - b.angular_damping * sdt).max(0.0);
                    if b.angular_velocity.length_squared() > 1e-12 {
                        let dq = Quat::from_scaled_axis(b.angular_velocity * sdt);
                        b.orientation = (dq * b.orientation).normalize();
                    }
                }
            }
        }
    }

    /// Positional rope correction at the attachment lever. The generalized
    /// inverse mass mixes translation and rotation so a tugged corner both
    /// pulls and tilts the letter.
    fn solve_rope(&mut self, index: usize) {
        let rope = self.ropes[index];
        let anchor_pos = match self.bodies.get(rope.anchor) {
            Some(a) => a.position,
            None => return,
        };
        let Some(body) = self.bodies.get_mut(rope.body) else {
            return;
        };
        if body.kind != BodyKind::Dynamic {
            return;
        }
        let attach = body.local_to_world(rope.local_attach);
        let delta = attach - anchor_pos;
        let dist = delta.length();
        if dist <= rope.length || dist <= 1e-6 {
            return;
        }
        let n = delta / dist;
        let c = dist - rope.length;
        let r = attach - body.position;
        let rn = r.cross(n);
        let w = body.inv_mass + body.inv_inertia * rn.length_squared();
        if w <= 0.0 {
            return;
        }
        let lambda = c / w;
        body.position -= n * (lambda * body.inv_mass);
        let dw = body.inv_inertia * r.cross(-n * lambda);
        if dw.length_squared() > 1e-12 {
            body.orientation = (Quat::from_scaled_axis(dw) * body.orientation).normalize();
        }
    }

    fn update_velocities(&mut self, sdt: f32) {
        for b in &mut self.bodies {
            if b.kind == BodyKind::Dynamic {
                b.velocity = (b.position - b.prev_position) / sdt;
            }
        }
    }

    /// Sphere-sphere contacts: separate positionally, then apply a
    /// restitution impulse if the pair is still approaching.
    fn resolve_contacts(
        &mut self,
        pairs: &mut FnvHashSet<(usize, usize)>,
        speeds: &mut Vec<((usize, usize), f32)>,
    ) {
        let n = self.bodies.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (ra, rb) = (self.bodies[i].radius, self.bodies[j].radius);
                if ra <= 0.0 || rb <= 0.0 {
                    continue;
                }
                let (ka, kb) = (self.bodies[i].kind, self.bodies[j].kind);
                if ka != BodyKind::Dynamic && kb != BodyKind::Dynamic {
                    continue;
                }
                let delta = self.bodies[j].position - self.bodies[i].position;
                let dist = delta.length();
                let rsum = ra + rb;
                if dist >= rsum || dist <= 1e-6 {
                    continue;
                }
                let normal = delta / dist;
                let (wa, wb) = (self.bodies[i].inv_mass, self.bodies[j].inv_mass);
                let wsum = wa + wb;
                if wsum <= 0.0 {
                    continue;
                }
                let depth = rsum - dist;
                let rel = self.bodies[j].velocity - self.bodies[i].velocity;
                let approach = -rel.dot(normal);

                // positional separation split by inverse mass
                let corr = normal * (depth / wsum);
                self.bodies[i].position -= corr * wa;
                self.bodies[j].position += corr * wb;

                if approach > 0.0 {
                    let impulse = normal * ((1.0 + RESTITUTION) * approach / wsum);
                    self.bodies[i].velocity -= impulse * wa;
                    self.bodies[j].velocity += impulse * wb;
                }

                pairs.insert((i, j));
                speeds.push(((i, j), approach.max(0.0)));
            }
        }
    }
}
