pub mod firestore_document_response;
