/// Buffer role bookkeeping
///
/// Each band owns up to four sample buffers. Which one receives the frame
/// being decoded and which ones serve as motion references rotates with the
/// frame types; these state machines track that rotation.

use crate::indeo4::FrameType as Iv4Frame;
use crate::indeo5::FrameType as Iv5Frame;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferRoles {
    pub dst:     usize,
    pub ref_buf: usize,
    /// Indeo 4 backward reference, Indeo 5 scalability reference.
    pub b_ref:   usize,
}

// ─── Indeo 4 ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Indeo4Roles {
    pub roles: BufferRoles,
}

impl Default for Indeo4Roles {
    fn default() -> Self {
        Indeo4Roles { roles: BufferRoles { dst: 0, ref_buf: 1, b_ref: 3 } }
    }
}

impl Indeo4Roles {
    pub fn switch(&mut self, prev: Iv4Frame, cur: Iv4Frame) {
        let r = &mut self.roles;
        match (prev.is_reference(), cur.is_reference()) {
            (true, true) => std::mem::swap(&mut r.dst, &mut r.ref_buf),
            (true, false) => {
                std::mem::swap(&mut r.ref_buf, &mut r.b_ref);
                std::mem::swap(&mut r.dst, &mut r.ref_buf);
            }
            _ => {}
        }
    }
}

// ─── Indeo 5 ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Indeo5Roles {
    pub roles:      BufferRoles,
    pub buf_switch: usize,
    pub inter_scal: bool,
}

impl Default for Indeo5Roles {
    fn default() -> Self {
        Indeo5Roles {
            roles:      BufferRoles { dst: 0, ref_buf: 1, b_ref: 0 },
            buf_switch: 0,
            inter_scal: false,
        }
    }
}

impl Indeo5Roles {
    pub fn switch(&mut self, prev: Iv5Frame, cur: Iv5Frame) {
        match prev {
            Iv5Frame::Intra | Iv5Frame::Inter => {
                self.buf_switch ^= 1;
                self.roles.dst = self.buf_switch;
                self.roles.ref_buf = self.buf_switch ^ 1;
            }
            Iv5Frame::InterScal => {
                if !self.inter_scal {
                    self.roles.b_ref = 2;
                    self.inter_scal = true;
                }
                std::mem::swap(&mut self.roles.dst, &mut self.roles.b_ref);
                self.roles.ref_buf = self.roles.b_ref;
            }
            Iv5Frame::InterNoRef | Iv5Frame::Null => {}
        }

        match cur {
            Iv5Frame::Intra | Iv5Frame::Inter => {
                if cur == Iv5Frame::Intra {
                    self.buf_switch = 0;
                }
                self.inter_scal = false;
                self.roles.dst = self.buf_switch;
                self.roles.ref_buf = self.buf_switch ^ 1;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indeo4_reference_chain() {
        let mut st = Indeo4Roles::default();
        st.switch(Iv4Frame::Intra, Iv4Frame::Intra);
        assert_eq!((st.roles.dst, st.roles.ref_buf), (1, 0));
        st.switch(Iv4Frame::Intra, Iv4Frame::Inter);
        // the inter frame predicts from the buffer the intra frame wrote
        assert_eq!((st.roles.dst, st.roles.ref_buf), (0, 1));
    }

    #[test]
    fn indeo4_non_reference_keeps_two_refs() {
        let mut st = Indeo4Roles::default();
        st.switch(Iv4Frame::Intra, Iv4Frame::Inter);
        let last = st.roles.dst;
        st.switch(Iv4Frame::Inter, Iv4Frame::Bidir);
        assert_eq!(st.roles.ref_buf, last);
        assert_ne!(st.roles.dst, last);
        assert_ne!(st.roles.dst, st.roles.b_ref);
        // a disposable frame after a disposable frame reuses its buffer
        let before = st.roles;
        st.switch(Iv4Frame::Bidir, Iv4Frame::InterNoRef);
        assert_eq!(st.roles, before);
    }

    #[test]
    fn indeo5_ping_pong() {
        let mut st = Indeo5Roles::default();
        st.switch(Iv5Frame::Intra, Iv5Frame::Intra);
        assert_eq!((st.roles.dst, st.roles.ref_buf), (0, 1));
        st.switch(Iv5Frame::Intra, Iv5Frame::Inter);
        assert_eq!((st.roles.dst, st.roles.ref_buf), (1, 0));
        st.switch(Iv5Frame::Inter, Iv5Frame::Inter);
        assert_eq!((st.roles.dst, st.roles.ref_buf), (0, 1));
        // null frames still advance the ring so the next frame predicts
        // from the last decoded picture
        st.switch(Iv5Frame::Inter, Iv5Frame::Null);
        st.switch(Iv5Frame::Null, Iv5Frame::Inter);
        assert_eq!((st.roles.dst, st.roles.ref_buf), (1, 0));
    }

    #[test]
    fn indeo5_scalable_reference() {
        let mut st = Indeo5Roles::default();
        st.switch(Iv5Frame::Intra, Iv5Frame::Intra);
        st.switch(Iv5Frame::Intra, Iv5Frame::InterScal);
        assert_eq!((st.roles.dst, st.roles.ref_buf), (1, 0));
        st.switch(Iv5Frame::InterScal, Iv5Frame::InterScal);
        assert!(st.inter_scal);
        assert_eq!((st.roles.dst, st.roles.ref_buf), (2, 1));
        st.switch(Iv5Frame::InterScal, Iv5Frame::Inter);
        assert!(!st.inter_scal);
    }
}
