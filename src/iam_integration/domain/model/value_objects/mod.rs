pub mod verified_subject;
