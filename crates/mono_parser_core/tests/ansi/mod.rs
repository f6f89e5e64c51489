mod chunking;

mod csi;

mod dcs;

mod esc;

mod osc;

mod sgr;
