//! Test fixtures: image bytes and scripted model replies.

/// Minimal valid 1x1 PNG bytes.
pub fn create_minimal_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
        0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x18, 0xDD, 0x8D, 0x89, 0x00, 0x00, 0x00,
        0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

/// Fenced reply describing a Labrador.
pub const DOG_REPLY: &str = "```json\n{\"species\": \"Dog\", \"breed\": \"Labrador Retriever\", \"country\": \"Canada\", \"habitat\": \"Domestic\", \"specifications\": \"Short coat\", \"common_problems\": \"Hip dysplasia\", \"fun_facts\": \"Webbed toes\"}\n```";

pub const CAT_REPLY: &str = "{\"species\": \"Cat\", \"breed\": \"Siamese\", \"country\": \"Thailand\", \"habitat\": \"Domestic\", \"specifications\": \"Blue eyes\", \"common_problems\": \"Dental disease\", \"fun_facts\": \"Very vocal\"}";

pub const CATERPILLAR_REPLY: &str = "{\"species\": \"Caterpillar\", \"breed\": \"N/A\", \"country\": \"Worldwide\", \"habitat\": \"Leaves\", \"specifications\": \"Many legs\", \"common_problems\": \"Birds\", \"fun_facts\": \"Becomes a butterfly\"}";

/// Reply for an image with no animal in it.
pub const NOT_AN_ANIMAL_REPLY: &str = "{\"species\": \"N/A\", \"breed\": \"n/a\", \"country\": \"None\", \"habitat\": \"\", \"specifications\": \" N/A \", \"common_problems\": \"none\", \"fun_facts\": \"N/A\"}";

pub const MALFORMED_REPLY: &str = "I think this is a dog, but I'm not sure.";
